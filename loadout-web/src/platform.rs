//! Browser implementations of the core's timer and network traits.
use loadout_core::{Clock, HttpResponse, Transport, TransportError};

use crate::dom;

/// `setTimeout`-backed clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    async fn sleep(&self, ms: u32) {
        let ms = i32::try_from(ms).unwrap_or(i32::MAX);
        if let Err(err) = dom::sleep_ms(ms).await {
            log::warn!("Timer failed: {}", dom::js_error_message(&err));
        }
    }
}

/// `fetch`-backed transport. Non-2xx responses are returned, not raised.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = dom::fetch_response(url)
            .await
            .map_err(|err| TransportError(dom::js_error_message(&err)))?;
        let body = dom::response_text(&response)
            .await
            .map_err(|err| TransportError(dom::js_error_message(&err)))?;
        Ok(HttpResponse::new(url, response.status(), body))
    }
}

/// Fresh seed for the session's RNG.
#[must_use]
pub fn entropy_seed() -> u64 {
    mix_seed(js_sys::Date::now(), js_sys::Math::random())
}

fn mix_seed(now_ms: f64, noise: f64) -> u64 {
    now_ms.to_bits() ^ noise.to_bits().rotate_left(32)
}

#[cfg(test)]
mod tests {
    use super::mix_seed;

    #[test]
    fn seed_depends_on_both_inputs() {
        let base = mix_seed(1_700_000_000_000.0, 0.25);
        assert_ne!(base, mix_seed(1_700_000_000_001.0, 0.25));
        assert_ne!(base, mix_seed(1_700_000_000_000.0, 0.5));
        assert_eq!(base, mix_seed(1_700_000_000_000.0, 0.25));
    }
}
