//! Energy and soil dashboard subcommands.

use crate::screen::{Screen, Selection};
use crate::source::{DashboardSource, FileSource};
use crate::tabs::detail::{render_energy_detail, render_soil_detail};
use crate::tabs::energy::{
    energy_tabs, EnergyMixTab, GridTab, MetricsTab, OverviewTab, TrendsTab,
};
use crate::tabs::soil::{soil_tabs, AnalyticsTab, SoilOverviewTab, YearlyComparisonTab};
use crate::tabs::{Formatters, ModalType, Tab, TabContext};
use crate::{EnergyView, SoilView};
use anyhow::{bail, Result};
use esg_api::client::{ClientConfig, EsgClient};
use esg_api::{EnergyConsumptionResponse, SoilHealthCarbonResponse};
use log::error;
use std::cell::RefCell;
use std::path::Path;

fn energy_view_tabs(view: Option<EnergyView>) -> Vec<Box<dyn Tab<EnergyConsumptionResponse>>> {
    match view {
        None => energy_tabs(),
        Some(EnergyView::Overview) => vec![Box::new(OverviewTab)],
        Some(EnergyView::Mix) => vec![Box::new(EnergyMixTab)],
        Some(EnergyView::Grid) => vec![Box::new(GridTab)],
        Some(EnergyView::Trends) => vec![Box::new(TrendsTab)],
        Some(EnergyView::Metrics) => vec![Box::new(MetricsTab)],
    }
}

fn soil_view_tabs(
    view: Option<SoilView>,
    computed_correlations: bool,
) -> Vec<Box<dyn Tab<SoilHealthCarbonResponse>>> {
    match view {
        None => soil_tabs(computed_correlations),
        Some(SoilView::Overview) => vec![Box::new(SoilOverviewTab)],
        Some(SoilView::Analytics) => vec![Box::new(AnalyticsTab {
            computed_correlations,
        })],
        Some(SoilView::Yearly) => vec![Box::new(YearlyComparisonTab)],
    }
}

/// Load the screen's data, turning a failed fetch into an error carrying
/// the user-facing message.
async fn load<T, F, Fut>(screen: &mut Screen<T>, fetch: F) -> Result<()>
where
    F: FnOnce(Selection) -> Fut,
    Fut: std::future::Future<Output = Result<T, esg_api::ApiError>>,
{
    screen.refresh(fetch).await;
    if let Some(message) = screen.error() {
        error!(
            "Fetch failed for {} ({}): {}",
            screen.selection().company_id,
            screen.selection().year,
            message
        );
        bail!("{}", message);
    }
    Ok(())
}

/// Render the `shown` tabs for `data`, then the detail view for `detail`
/// if any tab in `all` handles it.
fn render_screen<R>(
    data: Option<&R>,
    shown: &[Box<dyn Tab<R>>],
    all: &[Box<dyn Tab<R>>],
    detail: Option<&str>,
    render_detail: impl Fn(&R, &str, ModalType, &Formatters) -> Option<String>,
) -> Result<String> {
    let formatters = Formatters::default();
    let requested = RefCell::new(None);
    let on_drill_down =
        |metric: &str, modal: ModalType| *requested.borrow_mut() = Some((metric.to_string(), modal));
    let ctx = TabContext::new(&formatters, &on_drill_down);

    let mut views: Vec<String> = shown.iter().map(|tab| tab.render(data, &ctx)).collect();

    if let (Some(key), Some(data)) = (detail, data) {
        let handled = all.iter().any(|tab| tab.select(data, key, &ctx));
        let opened = requested
            .borrow()
            .clone()
            .filter(|_| handled)
            .and_then(|(metric, modal)| render_detail(data, &metric, modal, &formatters));
        match opened {
            Some(view) => views.push(view),
            None => bail!("No detail view for {:?}", key),
        }
    }
    Ok(views.join("\n"))
}

async fn energy_output<S: DashboardSource>(
    source: &S,
    selection: Selection,
    view: Option<EnergyView>,
    detail: Option<&str>,
) -> Result<String> {
    let mut screen = Screen::new(selection);
    load(&mut screen, |sel| async move {
        source.energy(&sel.company_id, sel.year).await
    })
    .await?;
    render_screen(
        screen.data(),
        &energy_view_tabs(view),
        &energy_tabs(),
        detail,
        render_energy_detail,
    )
}

async fn soil_output<S: DashboardSource>(
    source: &S,
    selection: Selection,
    view: Option<SoilView>,
    detail: Option<&str>,
    computed_correlations: bool,
) -> Result<String> {
    let mut screen = Screen::new(selection);
    load(&mut screen, |sel| async move {
        source.soil(&sel.company_id, sel.year).await
    })
    .await?;
    render_screen(
        screen.data(),
        &soil_view_tabs(view, computed_correlations),
        &soil_tabs(computed_correlations),
        detail,
        render_soil_detail,
    )
}

pub async fn run_energy(
    config: &ClientConfig,
    company: &str,
    year: i32,
    view: Option<EnergyView>,
    detail: Option<&str>,
    from_file: Option<&Path>,
) -> Result<String> {
    let selection = Selection {
        company_id: company.to_string(),
        year,
    };
    match from_file {
        Some(path) => energy_output(&FileSource::new(path), selection, view, detail).await,
        None => {
            let client = EsgClient::new(config.clone())?;
            energy_output(&client, selection, view, detail).await
        }
    }
}

pub async fn run_soil(
    config: &ClientConfig,
    company: &str,
    year: i32,
    view: Option<SoilView>,
    detail: Option<&str>,
    computed_correlations: bool,
    from_file: Option<&Path>,
) -> Result<String> {
    let selection = Selection {
        company_id: company.to_string(),
        year,
    };
    match from_file {
        Some(path) => {
            soil_output(
                &FileSource::new(path),
                selection,
                view,
                detail,
                computed_correlations,
            )
            .await
        }
        None => {
            let client = EsgClient::new(config.clone())?;
            soil_output(&client, selection, view, detail, computed_correlations).await
        }
    }
}
