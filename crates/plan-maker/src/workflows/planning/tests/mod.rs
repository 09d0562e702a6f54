mod common;
mod domain;
mod evaluation;
mod routing;
