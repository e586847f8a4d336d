use std::rc::Rc;

use js_sys::JSON;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use vizij_motion_core::{
    CommandBuffer, Decorator, DecoratorSpec, ElementId, HostEvent, LivePreference, MotionConfig,
    MotionPreferenceAdapter, MotionStage,
};

#[wasm_bindgen]
pub struct VizijMotion {
    stage: MotionStage,
    commands: CommandBuffer,
    preference: Rc<LivePreference>,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

// Property maps must arrive as plain objects, not JS Maps.
fn to_plain<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<JsValue, JsError> {
    value
        .serialize(&swb::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

#[wasm_bindgen]
impl VizijMotion {
    /// Create a new stage. Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new VizijMotion({ reveal: { delay: 0.1 } })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<VizijMotion, JsError> {
        console_error_panic_hook::set_once();

        let cfg = if jsvalue_is_undefined_or_null(&config) {
            MotionConfig::default()
        } else {
            // Round-trip through a string so the core validator sees the config.
            let s = JSON::stringify(&config)
                .map_err(|e| JsError::new(&format!("config stringify error: {:?}", e)))?
                .as_string()
                .ok_or_else(|| JsError::new("config: stringify produced non-string"))?;
            MotionConfig::from_json(&s).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        let preference = Rc::new(LivePreference::new(false));
        let stage = MotionStage::new(cfg, MotionPreferenceAdapter::new(preference.clone()));
        Ok(VizijMotion {
            stage,
            commands: CommandBuffer::new(),
            preference,
        })
    }

    /// Mirror the user's reduced-motion setting. Applies to decorators mounted afterwards.
    #[wasm_bindgen(js_name = set_reduced_motion)]
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.preference.set(reduced);
    }

    /// Next free element id, for hosts that do not mint their own.
    #[wasm_bindgen(js_name = allocate_element)]
    pub fn allocate_element(&mut self) -> u32 {
        self.stage.allocate_element().0
    }

    /// Mount a decorator described by JSON, e.g. `{ kind: "interaction", interaction: "parallax", speed: 2 }`.
    #[wasm_bindgen]
    pub fn mount(&mut self, element: u32, decorator_json: JsValue) -> Result<(), JsError> {
        let spec: DecoratorSpec = swb::from_value(decorator_json)
            .map_err(|e| JsError::new(&format!("decorator parse error: {e}")))?;
        self.stage
            .mount(&mut self.commands, ElementId(element), &spec)
            .map_err(|e| JsError::new(&format!("mount error: {e}")))
    }

    /// Unmount the decorator on `element`. Returns false if none was mounted.
    #[wasm_bindgen]
    pub fn unmount(&mut self, element: u32) -> bool {
        self.stage.unmount(&mut self.commands, ElementId(element))
    }

    /// Route one host event (JSON). Returns true if a decorator received it.
    #[wasm_bindgen]
    pub fn dispatch(&mut self, event_json: JsValue) -> Result<bool, JsError> {
        let event: HostEvent = swb::from_value(event_json)
            .map_err(|e| JsError::new(&format!("event parse error: {e}")))?;
        Ok(self.stage.dispatch(&mut self.commands, &event))
    }

    /// Route an array of host events in order. Returns how many were delivered.
    #[wasm_bindgen(js_name = dispatch_all)]
    pub fn dispatch_all(&mut self, events_json: JsValue) -> Result<u32, JsError> {
        let events: Vec<HostEvent> = swb::from_value(events_json)
            .map_err(|e| JsError::new(&format!("events parse error: {e}")))?;
        Ok(self.stage.dispatch_all(&mut self.commands, &events) as u32)
    }

    /// Take the host commands recorded since the last drain, as a JSON array.
    #[wasm_bindgen(js_name = drain_commands)]
    pub fn drain_commands(&mut self) -> Result<JsValue, JsError> {
        let drained = self.commands.drain();
        to_plain(&drained, "commands")
    }

    /// Phase or pointer state name for `element`, or undefined when it has none.
    #[wasm_bindgen(js_name = decorator_state)]
    pub fn decorator_state(&self, element: u32) -> Option<String> {
        let name = match self.stage.decorator(ElementId(element))? {
            Decorator::Reveal(r) => r.phase().name(),
            Decorator::Pointer(p) => p.state().name(),
            Decorator::Scroll(s) => match (s.reveal_phase(), s.pointer()) {
                (Some(phase), _) => phase.name(),
                (None, Some(p)) => p.state().name(),
                (None, None) => return None,
            },
            Decorator::Pulse(_) => return None,
        };
        Some(name.to_string())
    }

    /// Effective configuration (defaults filled in).
    #[wasm_bindgen]
    pub fn config(&self) -> Result<JsValue, JsError> {
        to_plain(self.stage.config(), "config")
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
