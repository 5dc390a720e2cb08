use serde_json::Value;
use zkbond_core::IdentityDisclosures;

const AGE: &str = "age";
const NATIONALITY: &str = "nationality";
const EXPIRY_DATE: &str = "expiry_date";
const ISSUING_COUNTRY: &str = "issuing_country";

/// Extract structured disclosures from an identity query result.
///
/// The query result maps field names to operator results, e.g.
/// `{"age": {"gte": {"expected": 18, "result": true}},
///   "nationality": {"disclose": {"result": "FRA"}}}`.
/// Fields without a dedicated slot land in `custom` unchanged.
pub fn extract_disclosures(query_result: &Value) -> IdentityDisclosures {
    let mut disclosures = IdentityDisclosures::default();
    let Some(fields) = query_result.as_object() else {
        return disclosures;
    };

    for (name, field) in fields {
        match name.as_str() {
            AGE => {
                if let Some(gte) = field.get("gte") {
                    disclosures.age_threshold = gte
                        .get("expected")
                        .and_then(Value::as_u64)
                        .and_then(|v| u32::try_from(v).ok());
                    disclosures.age_threshold_met = gte.get("result").and_then(Value::as_bool);
                } else {
                    disclosures.custom.insert(name.clone(), field.clone());
                }
            }
            NATIONALITY => match disclosed_string(field) {
                Some(nationality) => disclosures.nationality = Some(nationality),
                None => {
                    disclosures.custom.insert(name.clone(), field.clone());
                }
            },
            EXPIRY_DATE => {
                disclosures.passport_valid = field
                    .get("gte")
                    .and_then(|gte| gte.get("result"))
                    .and_then(Value::as_bool);
                if disclosures.passport_valid.is_none() {
                    disclosures.custom.insert(name.clone(), field.clone());
                }
            }
            ISSUING_COUNTRY => match disclosed_string(field) {
                Some(country) => disclosures.issuing_country = Some(country),
                None => {
                    disclosures.custom.insert(name.clone(), field.clone());
                }
            },
            _ => {
                disclosures.custom.insert(name.clone(), field.clone());
            }
        }
    }

    disclosures
}

fn disclosed_string(field: &Value) -> Option<String> {
    field
        .get("disclose")
        .and_then(|d| d.get("result"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}
