use integration_tests::harness;
use proxyaddr_core::conf::{LoadedPolicy, load_policy};

#[allow(dead_code)]
pub fn load_fixture(file: &str) -> LoadedPolicy {
    load_policy(&harness::fixture_path(file)).expect("failed to load fixture policy")
}

#[allow(dead_code)]
pub fn some(addr: &str) -> Option<String> {
    Some(addr.to_string())
}
