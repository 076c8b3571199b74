use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use reqwest::Client;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::services::errors::ExchangeError;

// the feed nests three levels of this node; the innermost carries the rates
const RATE_NODE: &[u8] = b"Cube";

pub struct RateFeedClient {
    http: Client,
    feed_url: String,
}

impl RateFeedClient {
    pub fn new(feed_url: String) -> RateFeedClient {
        RateFeedClient {
            http: Client::new(),
            feed_url,
        }
    }

    /// Fetches the reference rate document and extracts one decimal rate per
    /// currency leaf. The feed's base currency is implicit and never appears
    /// as a key. A single attempt, no retries.
    pub async fn fetch_rates(&self) -> Result<HashMap<String, Decimal>, ExchangeError> {
        info!("fetching exchange rates from {}", self.feed_url);

        let response = self
            .http
            .get(&self.feed_url)
            .send()
            .await
            .map_err(|e| ExchangeError::FeedUnavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| ExchangeError::FeedUnavailable(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::FeedUnavailable(e.to_string()))?;

        let rates = parse_rate_feed(&body)?;
        info!("parsed {} currency rates from the feed", rates.len());
        Ok(rates)
    }
}

/// Walks the document and collects `currency`/`rate` attribute pairs from
/// rate nodes nested two levels below the outermost one. Leaves with missing
/// or unreadable attributes are skipped, a document that is not XML at all is
/// rejected.
pub fn parse_rate_feed(body: &str) -> Result<HashMap<String, Decimal>, ExchangeError> {
    let mut reader = Reader::from_str(body);
    let mut rates: HashMap<String, Decimal> = HashMap::new();
    let mut rate_node_depth = 0;
    let mut open_elements = 0;
    let mut saw_element = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                saw_element = true;
                open_elements += 1;
                if e.local_name().as_ref() == RATE_NODE {
                    if rate_node_depth == 2 {
                        collect_rate_leaf(&e, &mut rates);
                    }
                    rate_node_depth += 1;
                }
            }
            Ok(Event::Empty(e)) => {
                saw_element = true;
                if e.local_name().as_ref() == RATE_NODE && rate_node_depth == 2 {
                    collect_rate_leaf(&e, &mut rates);
                }
            }
            Ok(Event::End(e)) => {
                open_elements -= 1;
                if e.local_name().as_ref() == RATE_NODE {
                    rate_node_depth -= 1;
                }
            }
            Ok(Event::Eof) => {
                if !saw_element {
                    return Err(ExchangeError::FeedMalformed(
                        "document contains no XML elements".to_string(),
                    ));
                }
                if open_elements != 0 {
                    return Err(ExchangeError::FeedMalformed(
                        "document ends with unclosed elements".to_string(),
                    ));
                }
                break;
            }
            Ok(_) => {}
            Err(e) => return Err(ExchangeError::FeedMalformed(e.to_string())),
        }
    }

    Ok(rates)
}

fn collect_rate_leaf(e: &BytesStart, rates: &mut HashMap<String, Decimal>) {
    let mut currency: Option<String> = None;
    let mut rate: Option<String> = None;

    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"currency" => currency = attr.unescape_value().ok().map(|v| v.into_owned()),
            b"rate" => rate = attr.unescape_value().ok().map(|v| v.into_owned()),
            _ => {}
        }
    }

    match (currency, rate) {
        (Some(currency), Some(rate)) => match rate.parse::<Decimal>() {
            Ok(parsed) => {
                rates.insert(currency, parsed);
            }
            Err(_) => warn!("skipping {} leaf, rate '{}' is not a decimal", currency, rate),
        },
        _ => warn!("skipping rate leaf with a missing currency or rate attribute"),
    }
}
