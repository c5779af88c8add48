//! Donation form and receipts.
//!
//! The amount is the only validated input: it must parse to a positive number
//! of cents before anything is persisted.

use crate::model::calendar::format_local_datetime;
use crate::model::money::{format_cents, parse_amount_to_cents};
use crate::model::records::Donation;
use crate::router::ViewId;
use crate::store::StoreResult;
use crate::view::{
    ActionContext, ActionKind, Block, Effect, FieldKind, FormSpec, ListItem, RenderContext,
    Screen, UiAction,
};
use chrono::Utc;
use log::info;

const ANONYMOUS_DONOR: &str = "Anonymous";

pub fn render(ctx: &RenderContext<'_>) -> Screen {
    let donations = ctx.store.get::<Donation>();
    let receipts = donations
        .iter()
        .rev()
        .map(|donation| {
            ListItem::new(
                &donation.id,
                format!("{} — {}", format_cents(donation.amount), donation.fund),
            )
            .subtitle(format_local_datetime(&donation.created_at, &ctx.now))
        })
        .collect();

    Screen::new(ViewId::Giving, "Giving")
        .block(Block::Form {
            form: FormSpec::new("Give", "Give")
                .field("amount", "Amount", FieldKind::Number)
                .field("donor_name", "Name", FieldKind::Text)
                .field("fund", "Fund", FieldKind::Text),
        })
        .block(Block::heading("Receipts"))
        .block(Block::list("donation-receipts", receipts))
        .action(ActionKind::Donate, "Give")
}

pub fn handle(ctx: &mut ActionContext<'_>, action: UiAction) -> StoreResult<Vec<Effect>> {
    let UiAction::Donate { values } = action else {
        return Ok(Vec::new());
    };
    let Some(amount) = parse_amount_to_cents(values.get("amount")) else {
        return Ok(vec![Effect::alert("Enter amount")]);
    };
    let donor_name = match values.get("donor_name") {
        "" => ANONYMOUS_DONOR.to_string(),
        name => name.to_string(),
    };
    let fund = values.get("fund").to_string();
    let created_at = ctx.now.with_timezone(&Utc);

    ctx.store.update::<Donation, _>(|donations| {
        let id = ctx.ids.new_record_id(donations);
        donations.push(Donation {
            id,
            amount,
            donor_name,
            fund,
            created_at,
        });
    })?;
    info!("event=donation_record module=view status=ok amount_cents={amount}");
    Ok(vec![Effect::alert("Donation simulated — receipt saved")])
}
