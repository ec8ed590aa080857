/// Helper macro to avoid retyping the API group of the Camel-K custom resources when creating
/// further string constants from it. When given no parameters, this returns the group. When given
/// a string literal parameter it adds `/parameter` to the end.
macro_rules! camel {
    () => {
        "camel.apache.org"
    };
    ($s:literal) => {
        concat!(camel!(), "/", $s)
    };
}

// API identifiers
pub const GROUP: &str = camel!();
pub const VERSION: &str = "v1";
pub const API_VERSION: &str = camel!("v1");

// Defaults for the provider configuration
pub const DEFAULT_FIELD_MANAGER: &str = "camelk";
pub const DEFAULT_NAMESPACE: &str = "default";

// Defaults for waiting on deletion, in seconds
pub const DEFAULT_DELETE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DELETE_POLL_INTERVAL_SECS: u64 = 5;

/// The shortest sleep the delete-wait poller performs between existence checks.
pub const MIN_POLL_INTERVAL_SECS: u64 = 1;

// Well known labels and annotations used by Camel-K
pub const LABEL_KAMELET_TYPE: &str = camel!("kamelet.type");
pub const ANNOTATION_OPERATOR_ID: &str = camel!("operator.id");

// Kubernetes naming limits
pub const MAX_NAME_LEN: usize = 253;
pub const MAX_NAMESPACE_LEN: usize = 63;

#[test]
fn camel_constants_macro_test() {
    assert_eq!("camel.apache.org", camel!());
    assert_eq!("camel.apache.org/v1", API_VERSION);
    assert_eq!("camel.apache.org/kamelet.type", LABEL_KAMELET_TYPE);
}
