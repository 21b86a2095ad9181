//! Resource paths of the bridge JSON API.
//!
//! Every path is rooted at the application key issued when the caller was
//! paired with the bridge.

/// Root path for an application key, e.g. `/api/appkey`.
///
/// A GET here returns the bridge's full state document and doubles as the
/// reachability check during session verification.
pub fn api(credential: &str) -> String {
    format!("/api/{}", credential)
}

/// Collection of all lights known to the bridge
pub fn lights(credential: &str) -> String {
    format!("/api/{}/lights", credential)
}

/// A single light
pub fn light(credential: &str, id: &str) -> String {
    format!("/api/{}/lights/{}", credential, id)
}

/// The writable state object of a light
pub fn light_state(credential: &str, id: &str) -> String {
    format!("/api/{}/lights/{}/state", credential, id)
}

/// Collection of all groups configured on the bridge
pub fn groups(credential: &str) -> String {
    format!("/api/{}/groups", credential)
}

/// A single group
pub fn group(credential: &str, id: &str) -> String {
    format!("/api/{}/groups/{}", credential, id)
}

/// The writable action object of a group
pub fn group_action(credential: &str, id: &str) -> String {
    format!("/api/{}/groups/{}/action", credential, id)
}
