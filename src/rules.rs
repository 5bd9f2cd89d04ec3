//! Rule matching for newly managed clients (spec §6 Configuration "Rules").
use crate::backend::WindowInfo;

/// One configured rule: clients whose class/instance/title match are
/// assigned the given tags and floating/monitor overrides.
#[derive(Debug, Clone)]
pub struct Rule {
    pub class: Option<String>,
    pub instance: Option<String>,
    pub title: Option<String>,
    pub tags: u32,
    pub floating: bool,
    pub monitor: Option<i32>,
}

impl Rule {
    fn matches(&self, info: &WindowInfo) -> bool {
        let class_ok = self.class.as_deref().map_or(true, |c| c == info.class);
        let instance_ok = self
            .instance
            .as_deref()
            .map_or(true, |i| i == info.instance);
        let title_ok = self.title.as_deref().map_or(true, |t| t == info.title);
        class_ok && instance_ok && title_ok
    }
}

/// The outcome of matching a window against the configured rule list.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleMatch {
    pub tags: u32,
    pub floating: bool,
    pub monitor: Option<i32>,
}

/// Evaluate `rules` against `info`, first-match-wins per spec, but unioning
/// the `tags` of every rule that matches (so a title-only rule can layer
/// extra tags on top of a class rule without the class rule's tags being
/// discarded).
pub fn match_rules(rules: &[Rule], info: &WindowInfo) -> RuleMatch {
    let mut out = RuleMatch::default();
    let mut floating_set = false;
    let mut monitor_set = false;

    for rule in rules {
        if !rule.matches(info) {
            continue;
        }
        out.tags |= rule.tags;
        if !floating_set {
            out.floating = rule.floating;
            floating_set = true;
        }
        if !monitor_set {
            out.monitor = rule.monitor;
            monitor_set = rule.monitor.is_some();
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(class: &str, instance: &str, title: &str) -> WindowInfo {
        WindowInfo {
            class: class.into(),
            instance: instance.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    #[test]
    fn unmatched_rules_contribute_nothing() {
        let rules = vec![Rule {
            class: Some("Gimp".into()),
            instance: None,
            title: None,
            tags: 1 << 3,
            floating: true,
            monitor: None,
        }];
        let out = match_rules(&rules, &info("Firefox", "Navigator", "Example"));
        assert_eq!(out.tags, 0);
        assert!(!out.floating);
    }

    #[test]
    fn matching_rules_union_tags() {
        let rules = vec![
            Rule {
                class: Some("Firefox".into()),
                instance: None,
                title: None,
                tags: 1 << 1,
                floating: false,
                monitor: None,
            },
            Rule {
                class: None,
                instance: None,
                title: Some("Example".into()),
                tags: 1 << 4,
                floating: false,
                monitor: None,
            },
        ];
        let out = match_rules(&rules, &info("Firefox", "Navigator", "Example"));
        assert_eq!(out.tags, (1 << 1) | (1 << 4));
    }
}
