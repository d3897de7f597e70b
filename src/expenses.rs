//! Fixed monthly expense figures shown below the account panel

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Expense {
    pub month: &'static str,
    pub amount: u32,
}

impl Expense {
    const fn new(month: &'static str, amount: u32) -> Self {
        Self { month, amount }
    }

    /// List entry, e.g. `January: $65`
    pub fn label(&self) -> String {
        format!("{}: ${}", self.month, self.amount)
    }
}

pub const CHART_TITLE: &str = "Monthly Expenses";

pub const MONTHLY_EXPENSES: [Expense; 7] = [
    Expense::new("January", 65),
    Expense::new("February", 59),
    Expense::new("March", 80),
    Expense::new("April", 81),
    Expense::new("May", 56),
    Expense::new("June", 55),
    Expense::new("July", 40),
];

const AXIS_STEP: u32 = 10;

/// Top of the value axis: the largest amount rounded up to the next step
pub fn axis_max(expenses: &[Expense]) -> u32 {
    let max = expenses.iter().map(|e| e.amount).max().unwrap_or(0);
    max.div_ceil(AXIS_STEP).max(1) * AXIS_STEP
}

/// Bar heights in percent of the axis
pub fn bar_heights(expenses: &[Expense]) -> Vec<f32> {
    let top = axis_max(expenses) as f32;
    expenses.iter().map(|e| e.amount as f32 * 100.0 / top).collect()
}

/// Axis labels from zero to `axis_max`, top first
pub fn axis_ticks(expenses: &[Expense]) -> Vec<u32> {
    (0..=axis_max(expenses)).rev().step_by(AXIS_STEP as usize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_labels() {
        let labels: Vec<_> = MONTHLY_EXPENSES.iter().map(Expense::label).collect();
        assert_eq!(labels[0], "January: $65");
        assert_eq!(labels[6], "July: $40");
    }

    #[test]
    fn axis_rounds_up_to_step() {
        assert_eq!(axis_max(&MONTHLY_EXPENSES), 90);
        assert_eq!(axis_max(&[Expense::new("x", 90)]), 90);
        assert_eq!(axis_max(&[]), AXIS_STEP);
    }

    #[test]
    fn bars_scale_to_axis() {
        let heights = bar_heights(&MONTHLY_EXPENSES);
        assert_eq!(heights.len(), 7);
        assert!((heights[3] - 90.0).abs() < 0.01);
        assert!(heights.iter().all(|h| *h > 0.0 && *h <= 100.0));
    }

    #[test]
    fn ticks_run_top_down() {
        let ticks = axis_ticks(&MONTHLY_EXPENSES);
        assert_eq!(ticks.first(), Some(&90));
        assert_eq!(ticks.last(), Some(&0));
        assert_eq!(ticks.len(), 10);
    }
}
