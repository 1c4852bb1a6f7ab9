//! First-defined-value-wins evaluation over ordered lazy tiers

/// An ordered cascade of lazily evaluated value providers.
///
/// Tiers are pushed highest-precedence first and evaluated strictly in
/// that order; a tier only runs when every earlier tier declined, so an
/// override decided at tier one never touches the settings-derived tiers
/// below it.
///
/// ```
/// use restore_core::Cascade;
///
/// let value = Cascade::new()
///     .tier(|| None)
///     .tier(|| Some("declared"))
///     .tier(|| unreachable!("never evaluated"))
///     .resolve();
/// assert_eq!(value, Some("declared"));
/// ```
pub struct Cascade<'a, T> {
    tiers: Vec<Box<dyn FnOnce() -> Option<T> + 'a>>,
}

impl<'a, T> Cascade<'a, T> {
    pub fn new() -> Self {
        Self { tiers: Vec::new() }
    }

    /// Append the next-lower-precedence tier.
    pub fn tier(mut self, provider: impl FnOnce() -> Option<T> + 'a) -> Self {
        self.tiers.push(Box::new(provider));
        self
    }

    /// Evaluate tiers in order and return the first defined value.
    pub fn resolve(self) -> Option<T> {
        self.tiers.into_iter().find_map(|provider| provider())
    }
}

impl<T> Default for Cascade<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}
