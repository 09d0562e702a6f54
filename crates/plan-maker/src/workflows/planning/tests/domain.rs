use super::common::*;
use crate::workflows::planning::domain::{BusinessPlan, CategoryParseError, PlanCategory};

#[test]
fn category_tags_parse_by_label_or_variant_name() {
    assert_eq!("AI/ML".parse::<PlanCategory>(), Ok(PlanCategory::AiMl));
    assert_eq!(" e-commerce ".parse::<PlanCategory>(), Ok(PlanCategory::ECommerce));
    assert_eq!("saas".parse::<PlanCategory>(), Ok(PlanCategory::Saas));
}

#[test]
fn unknown_category_is_rejected() {
    assert_eq!(
        "Robotics".parse::<PlanCategory>(),
        Err(CategoryParseError("Robotics".to_string()))
    );

    let mut value = serde_json::to_value(strong_plan(
        "p-1",
        "Claims autopilot",
        PlanCategory::HealthTech,
    ))
    .expect("plan serializes");
    value["category"] = serde_json::json!("Robotics");

    let error = serde_json::from_value::<BusinessPlan>(value).expect_err("category rejected");
    assert!(error.to_string().contains("Robotics"));
}

#[test]
fn category_serializes_as_its_display_tag() {
    let plan = strong_plan("p-1", "Claims autopilot", PlanCategory::AiMl);
    let value = serde_json::to_value(&plan).expect("plan serializes");
    assert_eq!(value["category"], serde_json::json!("AI/ML"));

    let restored: BusinessPlan = serde_json::from_value(value).expect("plan deserializes");
    assert_eq!(restored, plan);
}
