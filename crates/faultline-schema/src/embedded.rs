pub const PLAN_SCHEMA_V1: &str = "faultline-plan/v1";

const PLAN_SCHEMA: &str = include_str!("../../../schemas/v1/plan.schema.json");

pub fn plan_schema_json() -> &'static str {
    PLAN_SCHEMA
}

#[cfg(test)]
#[path = "embedded_test.rs"]
mod tests;
