use bevy::prelude::*;

/// Per-model load outcome, used for state transitions and host notifications.
#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub catalog_resolved: bool,
    pub total: usize,
    pub loaded: Vec<String>,
    pub failed: Vec<String>,
}

impl LoadingProgress {
    pub fn begin(&mut self, total: usize) {
        self.catalog_resolved = true;
        self.total = total;
        self.loaded.clear();
        self.failed.clear();
    }

    pub fn mark_loaded(&mut self, id: &str) {
        self.loaded.push(id.to_string());
    }

    pub fn mark_failed(&mut self, id: &str) {
        self.failed.push(id.to_string());
    }

    pub fn settled(&self) -> usize {
        self.loaded.len() + self.failed.len()
    }

    /// Every requested file has either loaded or failed.
    pub fn is_complete(&self) -> bool {
        self.catalog_resolved && self.settled() >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_when_every_load_settles() {
        let mut progress = LoadingProgress::default();
        assert!(!progress.is_complete());

        progress.begin(3);
        progress.mark_loaded("cookie");
        progress.mark_failed("cake");
        assert!(!progress.is_complete());

        progress.mark_loaded("plate");
        assert!(progress.is_complete());
        assert_eq!(progress.settled(), 3);
    }

    #[test]
    fn empty_catalog_is_immediately_complete() {
        let mut progress = LoadingProgress::default();
        progress.begin(0);
        assert!(progress.is_complete());
    }
}
