/// The version reported by `corral version` and `corral --version`.
pub(crate) fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
