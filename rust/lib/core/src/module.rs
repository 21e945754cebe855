use axum::Router;

/// A service module that contributes HTTP routes.
///
/// Each business module implements this trait to register its API
/// endpoints. The server binary collects all modules and merges their
/// routes with the system endpoints into a single Router.
pub trait Module: Send + Sync {
    /// Module name, used for logging.
    fn name(&self) -> &str;

    /// Return the module's routes. They are merged at the root, unprefixed.
    fn routes(&self) -> Router;
}
