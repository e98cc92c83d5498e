use super::ui;
use crate::core::{
    Field, PriceLoader, PriceStore, SwapError, SwapRequest, SwapResult, convert, validate,
};
use anyhow::Result;
use tracing::warn;

/// Validates the request and converts it against the current snapshot.
pub async fn submit(store: &PriceStore, request: &SwapRequest) -> Result<SwapResult, SwapError> {
    validate(request)?;
    convert(
        store,
        &request.from_currency,
        &request.to_currency,
        request.amount,
    )
    .await
}

pub fn display_result(request: &SwapRequest, result: &SwapResult) -> String {
    let from = &request.from_currency;
    let to = &request.to_currency;

    let mut output = format!("{}\n\n", ui::style_text("Swap", ui::StyleType::Title));
    output.push_str(&format!(
        "{} {} {}\n",
        ui::style_text("Amount to send:", ui::StyleType::Label),
        ui::format_amount(request.amount),
        from
    ));
    output.push_str(&format!(
        "{} 1 {} = {} {}\n",
        ui::style_text("Exchange rate:", ui::StyleType::Label),
        from,
        ui::format_amount(result.exchange_rate),
        to
    ));
    output.push_str(&format!(
        "{} {}",
        ui::style_text("Amount to receive:", ui::StyleType::Label),
        ui::style_text(
            &format!("{} {}", ui::format_amount(result.received_amount), to),
            ui::StyleType::Value
        )
    ));
    output
}

fn field_message(field: Field, msg: &str) -> String {
    format!(
        "{} {}",
        ui::style_text(&format!("{field}:"), ui::StyleType::Label),
        ui::style_text(msg, ui::StyleType::Error)
    )
}

pub fn display_error(err: &SwapError) -> String {
    match err {
        SwapError::Validation(errors) => errors
            .iter()
            .map(|(field, msg)| field_message(field, msg))
            .collect::<Vec<_>>()
            .join("\n"),
        SwapError::MissingPrice { field, .. } => field_message(*field, &err.to_string()),
        SwapError::StoreNotReady => ui::style_text(&err.to_string(), ui::StyleType::Error),
    }
}

pub async fn run(loader: &PriceLoader, request: &SwapRequest) -> Result<()> {
    // Nothing to fetch for a request that can never convert
    if let Err(errors) = validate(request) {
        let err = SwapError::from(errors);
        println!("{}", display_error(&err));
        return Err(err.into());
    }

    let pb = ui::new_spinner("Fetching prices...");
    let refreshed = loader.refresh().await;
    pb.finish_and_clear();
    if let Err(e) = refreshed {
        warn!(error = ?e, "Price refresh failed");
    }

    match submit(loader.store(), request).await {
        Ok(result) => {
            println!("{}", display_result(request, &result));
            Ok(())
        }
        Err(err) => {
            println!("{}", display_error(&err));
            Err(err.into())
        }
    }
}
