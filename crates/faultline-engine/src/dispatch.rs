/// Probe and action names may be written with dashes in a plan; the
/// registries index their handlers under the underscore form.
pub fn normalize_name(name: &str) -> String {
    name.replace('-', "_")
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod tests;
