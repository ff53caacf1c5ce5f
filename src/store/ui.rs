#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// Ephemeral presentation flags. No business logic lives here.
pub struct UiStore {
    loading: bool,
    search_loading: bool,
    modal_visible: bool,
    selected_tab: String,
    theme: Theme,
    refreshing: bool,
}

impl Default for UiStore {
    fn default() -> Self {
        Self {
            loading: false,
            search_loading: false,
            modal_visible: false,
            selected_tab: "movies".to_string(),
            theme: Theme::Light,
            refreshing: false,
        }
    }
}

impl UiStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_search_loading(&mut self, search_loading: bool) {
        self.search_loading = search_loading;
    }

    pub fn set_refreshing(&mut self, refreshing: bool) {
        self.refreshing = refreshing;
    }

    pub fn set_selected_tab(&mut self, tab: impl Into<String>) {
        self.selected_tab = tab.into();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
    }

    pub fn open_modal(&mut self) {
        self.modal_visible = true;
    }

    pub fn close_modal(&mut self) {
        self.modal_visible = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_search_loading(&self) -> bool {
        self.search_loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn is_modal_visible(&self) -> bool {
        self.modal_visible
    }

    pub fn selected_tab(&self) -> &str {
        &self.selected_tab
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark_theme(&self) -> bool {
        self.theme == Theme::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_toggle_flips_between_light_and_dark() {
        let mut ui = UiStore::new();
        assert!(!ui.is_dark_theme());
        ui.toggle_theme();
        assert!(ui.is_dark_theme());
        ui.toggle_theme();
        assert_eq!(ui.theme(), Theme::Light);
    }

    #[test]
    fn modal_helpers_set_visibility() {
        let mut ui = UiStore::new();
        ui.open_modal();
        assert!(ui.is_modal_visible());
        ui.close_modal();
        assert!(!ui.is_modal_visible());
    }
}
