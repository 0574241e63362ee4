use crate::model::Task;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FocusLevel {
    High,
    Medium,
    Low,
}

impl FocusLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Productivity {
    Excellent,
    Good,
    #[serde(rename = "Getting Started")]
    GettingStarted,
}

impl Productivity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::GettingStarted => "Getting Started",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Whole percent, rounded half up; 0 for an empty collection.
    pub completion_rate: u32,
}

impl Statistics {
    pub fn project(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed).count();
        let completion_rate = if total == 0 {
            0
        } else {
            ((200 * completed + total) / (2 * total)) as u32
        };

        Self {
            total,
            completed,
            pending: total - completed,
            completion_rate,
        }
    }

    pub fn focus_level(&self) -> FocusLevel {
        if self.completion_rate > 80 {
            FocusLevel::High
        } else if self.completion_rate > 50 {
            FocusLevel::Medium
        } else {
            FocusLevel::Low
        }
    }

    pub fn productivity(&self) -> Productivity {
        if self.completed > 10 {
            Productivity::Excellent
        } else if self.completed > 5 {
            Productivity::Good
        } else {
            Productivity::GettingStarted
        }
    }

    pub fn progress_label(&self) -> String {
        format!("{} of {} completed", self.completed, self.total)
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            stats: *self,
            focus_level: self.focus_level(),
            productivity: self.productivity(),
        }
    }
}

/// Counts plus their derived labels, as emitted by `stats --json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    #[serde(flatten)]
    pub stats: Statistics,
    pub focus_level: FocusLevel,
    pub productivity: Productivity,
}
