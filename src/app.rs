use crate::config::Config;
use crate::dashboard::{Dashboard, DashboardOptions};
use crate::error::Result;
use crate::geo::ChainedGeocoder;
use crate::models::Roaster;
use crate::source::RecordSource;
use crate::tui::AppAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Beans,
    Roasters,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Beans, Page::Roasters];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Beans => "Coffee Beans",
            Page::Roasters => "Roasters",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Page::Beans => Page::Roasters,
            Page::Roasters => Page::Beans,
        }
    }

    pub fn prev(&self) -> Self {
        // two pages, so previous and next coincide
        self.next()
    }
}

pub struct App {
    // Data
    pub dashboard: Dashboard,

    // UI State
    pub page: Page,
    pub selected_roaster: usize,
    pub show_help: bool,
    pub status_message: Option<String>,

    // Services
    source: RecordSource,
    geocoder: ChainedGeocoder,
    options: DashboardOptions,
}

impl App {
    pub async fn new(config: &Config) -> Result<Self> {
        let source = RecordSource::from_config(config);
        let geocoder = ChainedGeocoder::from_config(config)?;
        if !geocoder.has_remote() {
            tracing::info!("No GOOGLE_MAPS_API_KEY set, mapping known locations only");
        }
        let options = DashboardOptions {
            restrict_map_to_purchased: config.restrict_map_to_purchased,
        };

        let dashboard = Dashboard::build(&source, &geocoder, options).await;

        Ok(Self {
            dashboard,
            page: Page::default(),
            selected_roaster: 0,
            show_help: false,
            status_message: None,
            source,
            geocoder,
            options,
        })
    }

    pub fn selected_roaster(&self) -> Option<&Roaster> {
        self.dashboard.roasters.get(self.selected_roaster)
    }

    pub async fn handle_action(&mut self, action: AppAction) -> Result<bool> {
        match action {
            AppAction::Quit => return Ok(true),

            AppAction::NextPage => self.page = self.page.next(),
            AppAction::PrevPage => self.page = self.page.prev(),

            AppAction::MoveUp => {
                if self.page == Page::Roasters && self.selected_roaster > 0 {
                    self.selected_roaster -= 1;
                }
            }

            AppAction::MoveDown => {
                let len = self.dashboard.roasters.len();
                if self.page == Page::Roasters && len > 0 && self.selected_roaster < len - 1 {
                    self.selected_roaster += 1;
                }
            }

            AppAction::MoveToTop => self.selected_roaster = 0,

            AppAction::MoveToBottom => {
                self.selected_roaster = self.dashboard.roasters.len().saturating_sub(1);
            }

            AppAction::OpenWebsite => self.open_selected_website(),

            AppAction::Reload => self.reload().await,

            AppAction::ShowHelp => self.show_help = true,
            AppAction::HideHelp => self.show_help = false,
        }

        Ok(false)
    }

    /// Load both tables again and rebuild every view.
    pub async fn reload(&mut self) {
        self.dashboard = Dashboard::build(&self.source, &self.geocoder, self.options).await;

        let len = self.dashboard.roasters.len();
        if self.selected_roaster >= len {
            self.selected_roaster = len.saturating_sub(1);
        }
        self.status_message = Some(format!(
            "Reloaded {} purchases at {}",
            self.dashboard.purchase_count,
            self.dashboard.generated_at.format("%H:%M:%S")
        ));
    }

    fn open_selected_website(&mut self) {
        let Some(roaster) = self.selected_roaster() else {
            return;
        };
        let name = roaster.name.clone();
        let Some(url) = roaster.website.clone() else {
            self.status_message = Some(format!("No website on file for {name}"));
            return;
        };

        match open::that(&url) {
            Ok(()) => self.status_message = Some(format!("Opened {url}")),
            Err(e) => {
                tracing::error!("Failed to open {}: {}", url, e);
                self.status_message = Some(format!("Could not open {url}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn config_with_csvs(dir: &std::path::Path) -> Config {
        let beans = dir.join("beans.csv");
        let roasters = dir.join("roasters.csv");
        std::fs::File::create(&beans)
            .unwrap()
            .write_all(b"purchase_date,roaster,roast_level,weight_grams\n2024-01-01,Acme Roasters,Light,340\n")
            .unwrap();
        std::fs::File::create(&roasters)
            .unwrap()
            .write_all(b"name,city,state,website\nAcme Roasters,Berkeley,CA,\nNapa Beans,Napa,CA,\n")
            .unwrap();
        Config {
            beans_csv: beans.to_string_lossy().to_string(),
            roasters_csv: roasters.to_string_lossy().to_string(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn navigates_pages_and_roasters() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&config_with_csvs(dir.path())).await.unwrap();
        assert_eq!(app.page, Page::Beans);

        // selection only moves on the roaster page
        app.handle_action(AppAction::MoveDown).await.unwrap();
        assert_eq!(app.selected_roaster, 0);

        app.handle_action(AppAction::NextPage).await.unwrap();
        assert_eq!(app.page, Page::Roasters);
        app.handle_action(AppAction::MoveDown).await.unwrap();
        app.handle_action(AppAction::MoveDown).await.unwrap();
        assert_eq!(app.selected_roaster, 1);
        assert_eq!(app.selected_roaster().unwrap().name, "Napa Beans");

        app.handle_action(AppAction::MoveToTop).await.unwrap();
        assert_eq!(app.selected_roaster, 0);

        assert!(app.handle_action(AppAction::Quit).await.unwrap());
    }

    #[tokio::test]
    async fn missing_website_sets_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&config_with_csvs(dir.path())).await.unwrap();
        app.handle_action(AppAction::OpenWebsite).await.unwrap();
        assert_eq!(
            app.status_message.as_deref(),
            Some("No website on file for Acme Roasters")
        );
    }

    #[tokio::test]
    async fn reload_picks_up_new_rows() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_csvs(dir.path());
        let mut app = App::new(&config).await.unwrap();
        assert_eq!(app.dashboard.purchase_count, 1);

        std::fs::OpenOptions::new()
            .append(true)
            .open(&config.beans_csv)
            .unwrap()
            .write_all(b"2024-02-01,Napa Beans,Dark,250\n")
            .unwrap();
        app.handle_action(AppAction::Reload).await.unwrap();

        assert_eq!(app.dashboard.purchase_count, 2);
        assert!(app.status_message.unwrap().starts_with("Reloaded 2 purchases"));
    }
}
