//! Render-wide state handed to validation and primitive generation.

use crate::config::RenderSettings;
use crate::diagnostics::Diagnostics;

/// Settings plus the diagnostic sink for one render.
#[derive(Debug, Default)]
pub struct RenderContext {
    settings: RenderSettings,
    diagnostics: Diagnostics,
}

impl RenderContext {
    /// Creates a context. Settings are normalized so shutter times are sorted
    /// and never empty.
    pub fn new(settings: RenderSettings) -> Self {
        let diagnostics = Diagnostics::new();
        let settings = match settings.clone().normalized() {
            Ok(settings) => settings,
            Err(e) => {
                diagnostics.warning(format!("{e}, falling back to default shutter"));
                RenderSettings {
                    shutter_times: vec![0.0],
                    ..settings
                }
            }
        };
        Self {
            settings,
            diagnostics,
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Shutter times, ascending and non-empty.
    pub fn shutter_times(&self) -> &[f64] {
        &self.settings.shutter_times
    }

    pub fn shutter_open_time(&self) -> f64 {
        self.settings.shutter_times.first().copied().unwrap_or(0.0)
    }

    pub fn shutter_close_time(&self) -> f64 {
        self.settings.shutter_times.last().copied().unwrap_or(0.0)
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;

    #[test]
    fn shutter_range() {
        let ctx = RenderContext::new(RenderSettings {
            shutter_times: vec![1.0, 0.0, 0.5],
            ..Default::default()
        });
        assert_eq!(ctx.shutter_times(), &[0.0, 0.5, 1.0]);
        assert_eq!(ctx.shutter_open_time(), 0.0);
        assert_eq!(ctx.shutter_close_time(), 1.0);
    }

    #[test]
    fn non_finite_times_fall_back() {
        let ctx = RenderContext::new(RenderSettings {
            shutter_times: vec![f64::NAN],
            ..Default::default()
        });
        assert_eq!(ctx.shutter_times(), &[0.0]);

        let entries = ctx.diagnostics().snapshot();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].severity, Severity::Warning);
        assert!(entries[0].message.contains("not finite"));
    }
}
