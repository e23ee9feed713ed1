use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub farcaster_id: String,
    pub handle: String,
    pub display_name: Option<String>,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub range: String,
    pub total_casts: u64,
    pub total_impressions: u64,
    pub total_engagements: u64,
    pub avg_engagement_rate_percent: f64,
    pub follower_count: u64,
    pub account_age_days: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestDay {
    pub date: String,
    pub impressions: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlights {
    pub best_day_impressions: Option<BestDay>,
    pub top_cast_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub account: Account,
    pub summary: Summary,
    #[serde(default)]
    pub highlights: Highlights,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPost {
    pub id: i64,
    pub text: Option<String>,
    pub impressions: u64,
    pub engagements: u64,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopPostsResponse {
    pub account: Account,
    pub count: u64,
    // NB: a missing array is an empty result, not a malformed one
    #[serde(default)]
    pub posts: Vec<TopPost>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDay {
    pub date: String,
    pub post_count: u64,
    pub engagements: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub ok: bool,
    // NB: the echoed `fid` is ignored; some deployments send it as a string
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub days: Vec<ActivityDay>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_wire_names() {
        let json = r#"{
            "account": {"farcasterId": "774643", "handle": "devair", "displayName": null, "createdAt": "2024-01-02T03:04:05Z"},
            "summary": {"range": "Last 7 days", "totalCasts": 12, "totalImpressions": 3400, "totalEngagements": 120,
                        "avgEngagementRatePercent": 3.53, "followerCount": 1500, "accountAgeDays": 300},
            "highlights": {"bestDayImpressions": {"date": "2024-05-01", "impressions": 900}, "topCastId": null}
        }"#;
        let resp: SummaryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.account.handle, "devair");
        assert_eq!(resp.account.display_name, None);
        assert_eq!(resp.summary.follower_count, 1500);
        assert_eq!(
            resp.highlights.best_day_impressions.map(|d| d.impressions),
            Some(900)
        );
    }

    #[test]
    fn test_activity_without_days() {
        let resp: ActivityResponse = serde_json::from_str(r#"{"ok": true, "fid": 1}"#).unwrap();
        assert!(resp.ok);
        assert!(resp.days.is_empty());
    }

    #[test]
    fn test_activity_fid_echo_is_ignored() {
        let json = r#"{"ok": true, "fid": "774643", "range": "7d",
                       "days": [{"date": "2024-05-01", "postCount": 1, "engagements": 2}]}"#;
        let resp: ActivityResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.range.as_deref(), Some("7d"));
        assert_eq!(resp.days.len(), 1);
    }
}
