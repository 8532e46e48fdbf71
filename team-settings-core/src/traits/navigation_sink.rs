//! Client-side routing abstract Trait

/// Location changes requested by the editor
pub trait NavigationSink: Send + Sync {
    /// Client-side location change
    fn navigate_to(&self, address: &str);

    /// Full reload of the address, for server-rendered consistency.
    ///
    /// Hosts without a separate reload path fall back to `navigate_to`.
    fn hard_reload(&self, address: &str) {
        self.navigate_to(address);
    }
}
