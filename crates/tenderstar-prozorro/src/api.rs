//! openprocurement API client: contract listing and tender enrichment

use anyhow::Context;
use indicatif::ProgressBar;
use tenderstar_core::{StreamError, url_with_param, url_with_segment};

use crate::error::{DecodeError, EnrichError, FetchFailure};
use crate::model::{ContractPage, ContractSummary, TenderDocument, TenderEnvelope};

/// Source of raw response bodies.
///
/// The pipeline only ever issues plain GETs; decoding stays on this side so
/// transport failures and shape failures remain distinguishable.
pub trait Transport {
    fn get(&self, url: &str) -> Result<String, StreamError>;
}

/// Live transport over the shared HTTP client
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpTransport;

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String, StreamError> {
        tenderstar_core::get_text(url)
    }
}

/// Detail endpoint URL for one tender. The id is one encoded path segment.
pub fn tender_url(tenders_url: &str, tender_id: &str) -> Result<String, StreamError> {
    url_with_segment(tenders_url, tender_id)
}

/// List every contract, following `next_page.offset` until the source stops.
///
/// Paging ends on a falsy offset, an empty page, an offset that did not
/// advance, or after `max_pages` pages. A limit of zero issues no request.
/// Any transport or decode failure here aborts: enrichment needs the full list.
pub fn fetch_all<T: Transport + ?Sized>(
    transport: &T,
    contracts_url: &str,
    max_pages: Option<usize>,
    pb: &ProgressBar,
) -> anyhow::Result<Vec<ContractSummary>> {
    if max_pages == Some(0) {
        log::info!("Page limit is 0, nothing to fetch");
        return Ok(Vec::new());
    }

    let mut contracts = Vec::new();
    let mut offset: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page_no = pages + 1;
        let url = match &offset {
            Some(o) => url_with_param(contracts_url, "offset", o)?,
            None => contracts_url.to_string(),
        };

        log::info!(
            "Fetching contracts page {page_no} (offset {})",
            offset.as_deref().unwrap_or("none")
        );
        let body = transport
            .get(&url)
            .with_context(|| format!("Failed to fetch contracts page {page_no}"))?;
        let page: ContractPage = serde_json::from_str(&body)
            .map_err(|e| DecodeError::new(format!("contracts page {page_no}"), e))?;
        pages = page_no;

        let fetched = page.data.len();
        let next = page.next_offset();
        contracts.extend(page.data);
        log::info!("Fetched {fetched} contracts ({} total)", contracts.len());
        pb.set_message(format!("page {pages}, {} contracts", contracts.len()));

        let Some(next) = next else {
            log::info!("No more pages to fetch");
            break;
        };
        if fetched == 0 {
            log::info!("Empty page, stopping");
            break;
        }
        if offset.as_deref() == Some(next.as_str()) {
            log::warn!("Offset {next} did not advance, stopping");
            break;
        }
        if max_pages.is_some_and(|max| pages >= max) {
            log::info!("Reached page limit ({pages}), stopping");
            break;
        }
        offset = Some(next);
    }

    Ok(contracts)
}

/// Fetch the full tender document behind one contract.
pub fn fetch_tender<T: Transport + ?Sized>(
    transport: &T,
    tenders_url: &str,
    contract: &ContractSummary,
) -> Result<TenderDocument, EnrichError> {
    let tender_id = &contract.tender_id;
    log::debug!("Fetching tender details for {tender_id}");

    let body = tender_url(tenders_url, tender_id)
        .and_then(|url| transport.get(&url))
        .map_err(|cause| FetchFailure {
            tender_id: tender_id.clone(),
            cause,
        })?;
    let envelope: TenderEnvelope = serde_json::from_str(&body)
        .map_err(|e| DecodeError::new(format!("tender {tender_id}"), e))?;
    Ok(envelope.data)
}
