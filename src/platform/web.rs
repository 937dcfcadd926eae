//! Browser host capabilities (wasm32 only)

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::{HapticStrength, HostCapabilities, ShareDone, ShareMethod, ShareOutcome, share_message};

/// Plain browser tab: vibration API and clipboard, no mini-app SDK
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHost;

impl BrowserHost {
    /// `prefers-reduced-motion: reduce` media query
    pub fn prefers_reduced_motion() -> bool {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok())
            .flatten()
            .map(|mq| mq.matches())
            .unwrap_or(false)
    }
}

/// `navigator.clipboard`, which is undefined outside secure contexts
fn clipboard() -> Option<web_sys::Clipboard> {
    let navigator = web_sys::window()?.navigator();
    let value = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard")).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    value.dyn_into::<web_sys::Clipboard>().ok()
}

impl HostCapabilities for BrowserHost {
    fn share_score(&mut self, score: u64, done: ShareDone) {
        let Some(clipboard) = clipboard() else {
            log::info!("Clipboard unavailable; cannot share score");
            done(ShareOutcome::failed());
            return;
        };
        let promise = clipboard.write_text(&share_message(score));
        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => done(ShareOutcome {
                    success: true,
                    method: ShareMethod::Clipboard,
                }),
                Err(e) => {
                    log::warn!("Failed to copy score to clipboard: {e:?}");
                    done(ShareOutcome::failed());
                }
            }
        });
    }

    fn haptic(&mut self, strength: HapticStrength) -> bool {
        web_sys::window()
            .map(|w| w.navigator().vibrate_with_duration(strength.duration_ms()))
            .unwrap_or(false)
    }
}
