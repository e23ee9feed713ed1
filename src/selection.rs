use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Overview,
    Audience,
    Content,
    Video,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Audience, Tab::Content, Tab::Video];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Audience => "Audience",
            Tab::Content => "Content",
            Tab::Video => "Video",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|tab| *tab == self).unwrap_or(0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActivityMetric {
    #[default]
    PostCount,
    Engagements,
}

impl ActivityMetric {
    pub fn label(self) -> &'static str {
        match self {
            ActivityMetric::PostCount => "Posts",
            ActivityMetric::Engagements => "Engagements",
        }
    }
}

impl fmt::Display for ActivityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActivityMetric::PostCount => "postCount",
            ActivityMetric::Engagements => "engagements",
        })
    }
}

/// Which tab and chart metric are showing. Changing either only affects rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub tab: Tab,
    pub activity_metric: ActivityMetric,
}

impl Selection {
    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn set_metric(&mut self, metric: ActivityMetric) {
        self.activity_metric = metric;
    }

    pub fn next_tab(&mut self) {
        self.tab = Tab::ALL[(self.tab.index() + 1) % Tab::ALL.len()];
    }

    pub fn previous_tab(&mut self) {
        let n = Tab::ALL.len();
        self.tab = Tab::ALL[(self.tab.index() + n - 1) % n];
    }

    pub fn toggle_metric(&mut self) {
        self.activity_metric = match self.activity_metric {
            ActivityMetric::PostCount => ActivityMetric::Engagements,
            ActivityMetric::Engagements => ActivityMetric::PostCount,
        };
    }
}
