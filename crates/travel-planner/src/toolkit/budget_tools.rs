//! Budget & Cost Tools
//!
//! Thin tool wrappers over the pure calculator. Exact arithmetic runs here,
//! in deterministic code, and the model only composes the calls.

use async_trait::async_trait;
use rust_decimal::Decimal;

use agent_core::{
    tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::budget::{self, BudgetEstimator, BudgetMode};

fn decimal_arg(call: &ToolCall, key: &str) -> Decimal {
    call.f64_arg(key)
        .and_then(Decimal::from_f64_retain)
        .unwrap_or(Decimal::ZERO)
}

/// `estimate_trip_allocation`
pub struct TripAllocationTool;

#[async_trait]
impl Tool for TripAllocationTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "estimate_trip_allocation".into(),
            description:
                "Estimate the budget allocation for a trip across stay, food, transport and activities, plus the daily budget."
                    .into(),
            parameters: vec![
                ParameterSchema::required(
                    "total_budget",
                    "number",
                    "Total available budget for the trip",
                ),
                ParameterSchema::optional(
                    "num_days",
                    "integer",
                    "Number of days for the trip",
                    Some(serde_json::json!(1)),
                ),
                ParameterSchema::optional(
                    "mode",
                    "string",
                    "Spending mode: 'budget', 'standard', or 'luxury'",
                    Some(serde_json::json!("standard")),
                )
                .with_enum(vec![
                    serde_json::json!("budget"),
                    serde_json::json!("standard"),
                    serde_json::json!("luxury"),
                ]),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let total = decimal_arg(call, "total_budget");
        let num_days = call.i64_arg("num_days").unwrap_or(1);
        let mode = BudgetMode::parse(call.str_arg("mode").unwrap_or("standard"));

        let estimator = BudgetEstimator::new(total, num_days, mode);
        let breakdown = estimator.breakdown();

        let output = format!(
            "Estimated Budget Breakdown ({}):\n{}\n\nDaily Budget: ${}",
            mode.as_str(),
            breakdown.lines(""),
            estimator.daily(),
        );

        Ok(ToolResult::success("estimate_trip_allocation", output))
    }
}

/// `estimate_hotel_cost`
pub struct HotelCostTool;

#[async_trait]
impl Tool for HotelCostTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "estimate_hotel_cost".into(),
            description: "Estimate the total cost of a hotel stay from nightly price and nights."
                .into(),
            parameters: vec![
                ParameterSchema::required(
                    "price_per_night",
                    "number",
                    "Cost per night for accommodation",
                ),
                ParameterSchema::required("total_days", "number", "Total number of nights staying"),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let total = budget::multiply(
            decimal_arg(call, "price_per_night"),
            decimal_arg(call, "total_days"),
        );
        Ok(ToolResult::success("estimate_hotel_cost", total.to_string()))
    }
}

/// `add_costs`
pub struct AddCostsTool;

#[async_trait]
impl Tool for AddCostsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "add_costs".into(),
            description: "Add two individual cost components together.".into(),
            parameters: vec![
                ParameterSchema::required("cost1", "number", "First cost value"),
                ParameterSchema::required("cost2", "number", "Second cost value"),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let sum = budget::add(decimal_arg(call, "cost1"), decimal_arg(call, "cost2"));
        Ok(ToolResult::success("add_costs", sum.to_string()))
    }
}

/// `calculate_total_expense`
pub struct TotalExpenseTool;

#[async_trait]
impl Tool for TotalExpenseTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "calculate_total_expense".into(),
            description: "Sum any number of cost values to compute the total expense.".into(),
            parameters: vec![ParameterSchema::required(
                "costs",
                "array",
                "List of cost components to sum",
            )],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let costs: Vec<Decimal> = call
            .arguments
            .get("costs")
            .and_then(|v| v.as_array())
            .map(|values| {
                values
                    .iter()
                    .filter_map(serde_json::Value::as_f64)
                    .filter_map(Decimal::from_f64_retain)
                    .collect()
            })
            .unwrap_or_default();

        let total = budget::total_cost(&costs);
        Ok(ToolResult::success("calculate_total_expense", total.to_string()))
    }
}

/// `calculate_daily_budget`
pub struct DailyBudgetTool;

#[async_trait]
impl Tool for DailyBudgetTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "calculate_daily_budget".into(),
            description: "Calculate per-day budget from total cost and number of days.".into(),
            parameters: vec![
                ParameterSchema::required("total_cost", "number", "Overall expense"),
                ParameterSchema::required("days", "integer", "Total number of travel days"),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let daily = budget::daily_budget(
            decimal_arg(call, "total_cost"),
            call.i64_arg("days").unwrap_or(0),
        );
        Ok(ToolResult::success("calculate_daily_budget", daily.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_allocation_output_format() {
        let call = ToolCall::new("estimate_trip_allocation")
            .with_arg("total_budget", serde_json::json!(80000.0))
            .with_arg("num_days", serde_json::json!(3))
            .with_arg("mode", serde_json::json!("standard"));

        let result = TripAllocationTool.execute(&call).await.unwrap();
        assert!(result.output.contains("Estimated Budget Breakdown (standard)"));
        assert!(result.output.contains("Stay: $32000.00"));
        assert!(result.output.contains("Daily Budget: $26666.67"));
    }

    #[tokio::test]
    async fn test_total_expense_sums_array() {
        let call = ToolCall::new("calculate_total_expense")
            .with_arg("costs", serde_json::json!([120.5, 79.5, 40.0]));

        let result = TotalExpenseTool.execute(&call).await.unwrap();
        assert_eq!(result.output, "240.0");
    }

    #[tokio::test]
    async fn test_daily_budget_zero_days() {
        let call = ToolCall::new("calculate_daily_budget")
            .with_arg("total_cost", serde_json::json!(900.0))
            .with_arg("days", serde_json::json!(0));

        let result = DailyBudgetTool.execute(&call).await.unwrap();
        assert_eq!(result.output, "0");
    }

    #[tokio::test]
    async fn test_hotel_cost_multiplies() {
        let call = ToolCall::new("estimate_hotel_cost")
            .with_arg("price_per_night", serde_json::json!(140.0))
            .with_arg("total_days", serde_json::json!(3.0));

        let result = HotelCostTool.execute(&call).await.unwrap();
        assert_eq!(result.output, "420");
    }
}
