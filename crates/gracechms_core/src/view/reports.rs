//! CSV report downloads.

use crate::export::records_to_csv;
use crate::model::records::{Attendance, Donation};
use crate::router::ViewId;
use crate::store::StoreResult;
use crate::view::{
    ActionContext, ActionKind, Block, Effect, RenderContext, ReportKind, Screen, UiAction,
};

pub fn render(_ctx: &RenderContext<'_>) -> Screen {
    Screen::new(ViewId::Reports, "Reports")
        .block(Block::muted("Download attendance and giving history as CSV."))
        .action_with(ActionKind::ExportReport, "Attendance report", "attendance")
        .action_with(ActionKind::ExportReport, "Giving report", "giving")
}

pub fn handle(ctx: &mut ActionContext<'_>, action: UiAction) -> StoreResult<Vec<Effect>> {
    let UiAction::ExportReport { report } = action else {
        return Ok(Vec::new());
    };
    let (filename, csv) = match report {
        ReportKind::Attendance => ("attendance.csv", records_to_csv(&ctx.store.get::<Attendance>())),
        ReportKind::Giving => ("giving.csv", records_to_csv(&ctx.store.get::<Donation>())),
    };
    Ok(vec![match csv {
        Some(contents) => Effect::csv_download(filename, contents),
        None => Effect::alert("No data"),
    }])
}
