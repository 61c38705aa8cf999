#![forbid(unsafe_code)]

//! Named numeric limits a rendering may be asked to respect.

/// Optional limits applied while formatting content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Constraints {
    /// Widest a bracketed container may be while kept on a single line.
    pub container_width_per_line_limit: Option<usize>,
}

impl Constraints {
    pub const NONE: Self = Self {
        container_width_per_line_limit: None,
    };

    #[must_use]
    pub const fn with_container_width_per_line_limit(mut self, limit: Option<usize>) -> Self {
        self.container_width_per_line_limit = limit;
        self
    }
}

/// Whether a rendering satisfies each constraint.
///
/// `None` means the constraint was not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConstraintsSatisfaction {
    pub container_width_per_line_limit: Option<bool>,
}

impl ConstraintsSatisfaction {
    /// Check `constraints` against the widest container found in the output.
    pub fn new(constraints: &Constraints, max_container_width: usize) -> Self {
        Self {
            container_width_per_line_limit: constraints
                .container_width_per_line_limit
                .map(|limit| max_container_width <= limit),
        }
    }

    /// True unless some set constraint is violated.
    pub fn all_satisfied(&self) -> bool {
        self.container_width_per_line_limit.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_constraint_is_not_applicable() {
        let s = ConstraintsSatisfaction::new(&Constraints::NONE, 40);
        assert_eq!(s.container_width_per_line_limit, None);
        assert!(s.all_satisfied());
    }

    #[test]
    fn limit_is_inclusive() {
        let c = Constraints::default().with_container_width_per_line_limit(Some(10));
        assert_eq!(
            ConstraintsSatisfaction::new(&c, 10).container_width_per_line_limit,
            Some(true)
        );
        let s = ConstraintsSatisfaction::new(&c, 11);
        assert_eq!(s.container_width_per_line_limit, Some(false));
        assert!(!s.all_satisfied());
    }
}
