use serde::Serialize;
use serde_json::{json, Map, Value};

pub const FALLBACK_PAGE: &str = "/index.html";
pub const FALLBACK_RESPONSE_CODE: &str = "200";
pub const ERROR_CACHING_MIN_TTL: u32 = 300;

/// A single CloudFront custom error response rule. Field names follow the
/// distribution config schema exactly, including the TTL spelling.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorResponseRule {
    pub error_code: u16,
    pub response_page_path: String,
    pub response_code: String,
    #[serde(rename = "ErrorCachingMinTTL")]
    pub error_caching_min_ttl: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomErrorResponses {
    pub quantity: usize,
    pub items: Vec<ErrorResponseRule>,
}

fn fallback_rule(error_code: u16) -> ErrorResponseRule {
    ErrorResponseRule {
        error_code,
        response_page_path: FALLBACK_PAGE.to_string(),
        response_code: FALLBACK_RESPONSE_CODE.to_string(),
        error_caching_min_ttl: ERROR_CACHING_MIN_TTL,
    }
}

/// The fixed rule set for SPA routing: 403 and 404 both fall back to
/// /index.html with a 200 response.
pub fn spa_error_responses() -> CustomErrorResponses {
    let items = vec![fallback_rule(403), fallback_rule(404)];
    CustomErrorResponses {
        quantity: items.len(),
        items,
    }
}

/// Overwrites `CustomErrorResponses` in place, replacing whatever the
/// distribution held before. All other fields are left untouched.
pub fn apply_spa_fallback(config: &mut Map<String, Value>) {
    config.insert(
        "CustomErrorResponses".to_string(),
        json!(spa_error_responses()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_serializes_with_cloudfront_field_names() {
        let value = json!(fallback_rule(403));
        assert_eq!(
            value,
            json!({
                "ErrorCode": 403,
                "ResponsePagePath": "/index.html",
                "ResponseCode": "200",
                "ErrorCachingMinTTL": 300
            })
        );
    }

    #[test]
    fn patch_replaces_prior_rules() {
        let mut config = serde_json::from_str::<Map<String, Value>>(
            r#"{"Foo":"bar","CustomErrorResponses":{"Quantity":1,"Items":[{"ErrorCode":500}]}}"#,
        )
        .unwrap();

        apply_spa_fallback(&mut config);

        assert_eq!(config["Foo"], "bar");
        assert_eq!(config["CustomErrorResponses"]["Quantity"], 2);
        let items = config["CustomErrorResponses"]["Items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["ErrorCode"], 403);
        assert_eq!(items[1]["ErrorCode"], 404);
        assert_eq!(items[0]["ResponsePagePath"], "/index.html");
        assert_eq!(items[1]["ErrorCachingMinTTL"], 300);
    }

    #[test]
    fn patch_adds_rules_when_absent() {
        let mut config = Map::new();
        config.insert("Comment".to_string(), json!("spa"));

        apply_spa_fallback(&mut config);

        assert_eq!(config["CustomErrorResponses"]["Quantity"], 2);
    }

    #[test]
    fn patch_keeps_field_order() {
        let mut config = serde_json::from_str::<Map<String, Value>>(
            r#"{"Aliases":{},"CustomErrorResponses":{"Quantity":0,"Items":[]},"Comment":"x"}"#,
        )
        .unwrap();

        apply_spa_fallback(&mut config);

        let keys: Vec<&String> = config.keys().collect();
        assert_eq!(keys, ["Aliases", "CustomErrorResponses", "Comment"]);
    }
}
