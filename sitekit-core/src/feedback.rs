//! Button feedback timings for the simulated form submissions and code copy.

use std::time::Duration;

/// The two simulated forms on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    Newsletter,
}

/// What a form's submit button shows, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionPlan {
    /// Label while the submission is "in flight".
    pub pending_label: &'static str,
    /// Delay before the form is reset and the button re-enabled.
    pub settle_after: Duration,
    /// Label once settled.
    pub settled_label: &'static str,
    /// How long the success notice stays visible, for forms that have one.
    pub success_notice_for: Option<Duration>,
    /// Delay after settling before the original label returns, if it does.
    pub restore_label_after: Option<Duration>,
}

impl FormKind {
    /// Element id of the form.
    #[must_use]
    pub const fn form_id(self) -> &'static str {
        match self {
            Self::Contact => "contact-form",
            Self::Newsletter => "newsletter-form",
        }
    }

    #[must_use]
    pub const fn plan(self) -> SubmissionPlan {
        match self {
            Self::Contact => SubmissionPlan {
                pending_label: "Sending...",
                settle_after: Duration::from_millis(1500),
                settled_label: "Send Message",
                success_notice_for: Some(Duration::from_millis(5000)),
                restore_label_after: None,
            },
            Self::Newsletter => SubmissionPlan {
                pending_label: "Subscribing...",
                settle_after: Duration::from_millis(1000),
                settled_label: "Subscribed!",
                success_notice_for: None,
                restore_label_after: Some(Duration::from_millis(2000)),
            },
        }
    }
}

/// Feedback shown on a copy button after a successful copy.
pub struct CopyFeedback;

impl CopyFeedback {
    pub const LABEL: &'static str = "Copied!";
    pub const CLASS: &'static str = "copied";
    pub const DURATION: Duration = Duration::from_millis(2000);
}

/// Milliseconds for `setTimeout`-style APIs, saturating at `i32::MAX`.
#[must_use]
pub fn timeout_ms(duration: Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_form_shows_notice_and_keeps_label() {
        let plan = FormKind::Contact.plan();
        assert_eq!(plan.pending_label, "Sending...");
        assert_eq!(plan.settled_label, "Send Message");
        assert_eq!(plan.success_notice_for, Some(Duration::from_secs(5)));
        assert!(plan.restore_label_after.is_none());
    }

    #[test]
    fn newsletter_restores_original_label() {
        let plan = FormKind::Newsletter.plan();
        assert_eq!(plan.settle_after, Duration::from_secs(1));
        assert_eq!(plan.restore_label_after, Some(Duration::from_secs(2)));
        assert!(plan.success_notice_for.is_none());
    }

    #[test]
    fn timeouts_saturate() {
        assert_eq!(timeout_ms(CopyFeedback::DURATION), 2000);
        assert_eq!(timeout_ms(Duration::from_secs(u64::MAX)), i32::MAX);
    }
}
