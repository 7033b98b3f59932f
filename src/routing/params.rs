//! Path parameters captured by a matched route.

/// Ordered capture groups of the matched route pattern (group 0 excluded).
///
/// Built by the router for a single request and handed to the route
/// handler next to the request itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    values: Vec<String>,
}

impl PathParams {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// Returns the parameter captured by group `index + 1`.
    ///
    /// # Panics
    /// Panics when the route pattern captured fewer than `index + 1` groups.
    /// That means the handler was registered against the wrong pattern, which
    /// no request can fix.
    pub fn get(&self, index: usize) -> &str {
        match self.values.get(index) {
            Some(value) => value,
            None => panic!(
                "path parameter {} requested but route captured {}",
                index,
                self.values.len()
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.values
    }
}
