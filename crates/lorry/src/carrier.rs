//! The carrier: a self-protecting dynamic record.
//!
//! A [`Carrier`] behaves like an open mutable record for caller-supplied
//! keys while guaranteeing that its own operations can never be shadowed by
//! data. Operations are methods on the type; user data lives in a separate
//! keyed container behind guarded accessors, so no write can reach the
//! behavior surface. Every mutating operation returns `&mut Self` for
//! chaining.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::config::CarrierConfig;
use crate::error::{ErrorDescriptor, ThrowRequest};
use crate::flash::FlashRequest;
use crate::merge::merge_objects;
use crate::session::{SessionError, SessionStore};
use crate::slot::Slot;

/// Operation names user data may never shadow.
///
/// These are the carrier's operations as they appear in diagnostics and in
/// the protected key space. The lowercase `flash` and `err` keys are
/// ordinary, overwritable data and are not in this set.
pub const RESERVED_OPS: [&str; 5] = ["Merge", "Replace", "Reset", "Flash", "Throw"];

/// Data key holding the current flash payload.
pub const FLASH_KEY: &str = "flash";

/// Data key holding the last attached error descriptor.
pub const ERR_KEY: &str = "err";

/// Session key under which flash slots are stored.
const SESSION_FLASH_KEY: &str = "flash";

/// A request/response-scoped key-value carrier.
pub struct Carrier {
    config: CarrierConfig,
    data: BTreeMap<String, Slot>,
}

impl Carrier {
    /// Create an empty carrier.
    pub fn new(config: CarrierConfig) -> Self {
        Self {
            config,
            data: BTreeMap::new(),
        }
    }

    /// Create a carrier and merge `initial` into it.
    pub fn with_data(initial: Value, config: CarrierConfig) -> Self {
        let mut carrier = Self::new(config);
        carrier.merge(initial);
        carrier
    }

    /// The configured display name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    // ---- Data mutation ----

    /// Deep-merge `data` into the user-data space.
    ///
    /// Top-level keys naming a reserved operation are dropped silently
    /// before the merge. Incoming records merge recursively (a non-record
    /// target entry is coerced to an empty record first); sequences,
    /// scalars, and null overwrite wholesale. Non-record input merges
    /// nothing. The verbose trace shows the unstripped input.
    pub fn merge(&mut self, data: Value) -> &mut Self {
        let trace = self.config.verbose.then(|| data.to_string());

        if let Value::Object(source) = data {
            for (key, incoming) in source {
                if Self::is_reserved(&key) {
                    continue;
                }
                match incoming {
                    Value::Object(record) => {
                        let slot = self
                            .data
                            .entry(key)
                            .or_insert_with(|| Slot::Value(Value::Object(Map::new())));
                        if !slot.is_record() {
                            *slot = Slot::Value(Value::Object(Map::new()));
                        }
                        if let Slot::Value(Value::Object(target)) = slot {
                            merge_objects(target, record);
                        }
                    }
                    other => {
                        self.data.insert(key, Slot::Value(other));
                    }
                }
            }
        }

        if let Some(input) = trace {
            self.trace(&format!("Merge › {input}"));
        }
        self
    }

    /// Remove every key from the user-data space.
    pub fn reset(&mut self) -> &mut Self {
        self.data.clear();
        self.trace("Reset");
        self
    }

    /// Reset, then merge `data`.
    pub fn replace(&mut self, data: Value) -> &mut Self {
        self.reset();
        self.merge(data);
        self
    }

    // ---- Guarded accessors ----

    /// Read the entry at `key`.
    pub fn get(&self, key: &str) -> Option<&Slot> {
        self.data.get(key)
    }

    /// Read the JSON value at `key`, if the entry is not a callable.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.get(key)?.as_value()
    }

    /// Assign `value` at `key`.
    ///
    /// A write naming a reserved operation is absorbed: the carrier is
    /// unchanged, the call still chains, and a blocked-mutation notice is
    /// reported when logging is enabled.
    pub fn set(&mut self, key: &str, value: Value) -> &mut Self {
        if self.block_reserved(key, "SET") {
            return self;
        }
        self.data.insert(key.to_string(), Slot::Value(value));
        self
    }

    /// Install a callable at `key`, subject to the same guard as [`set`].
    ///
    /// [`set`]: Carrier::set
    pub fn define(
        &mut self,
        key: &str,
        callable: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> &mut Self {
        if self.block_reserved(key, "DEFINE") {
            return self;
        }
        self.data
            .insert(key.to_string(), Slot::Callable(Arc::new(callable)));
        self
    }

    /// Remove the entry at `key`, subject to the same guard as [`set`].
    ///
    /// [`set`]: Carrier::set
    pub fn remove(&mut self, key: &str) -> &mut Self {
        if self.block_reserved(key, "DELETE") {
            return self;
        }
        self.data.remove(key);
        self
    }

    /// Invoke the callable stored at `key`.
    pub fn call(&self, key: &str, args: &[Value]) -> Option<Value> {
        let callable = self.get(key)?.as_callable()?;
        Some(callable(args))
    }

    /// Iterate over the user-data keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Number of user-data entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Render the user-data space as a JSON object. Callables are skipped.
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .data
            .iter()
            .filter_map(|(key, slot)| Some((key.clone(), slot.as_value()?.clone())))
            .collect();
        Value::Object(map)
    }

    // ---- Flash ----

    /// Set or consume the flash message.
    ///
    /// A request carrying a title, message, or fields writes the pruned
    /// payload under the `flash` data key and, when a session is
    /// configured, into the session's flash slot (overwriting any prior
    /// entry). An empty request reads: it moves the pending session entry
    /// into the `flash` data key and removes it from the session. Without a
    /// session the carrier is a pure in-memory flash holder.
    pub fn flash(&mut self, request: impl Into<FlashRequest>) -> &mut Self {
        let request = request.into();
        if request.is_read() {
            self.consume_flash();
        } else {
            self.write_flash(request);
        }
        self
    }

    /// The current flash payload, if any.
    pub fn flash_payload(&self) -> Option<&Value> {
        self.value(FLASH_KEY)
    }

    fn write_flash(&mut self, request: FlashRequest) {
        let mut payload = Map::new();
        if let Some(title) = request.title() {
            payload.insert("title".into(), Value::String(title.to_string()));
        }
        if let Some(message) = request.message() {
            payload.insert("message".into(), Value::String(message.to_string()));
        }
        for (key, value) in request.fields {
            payload.insert(key, value);
        }

        if let Some(session) = self.config.session.clone() {
            if let Err(err) = self.store_session_slot(session.as_ref(), &payload) {
                self.report_session_error(&err);
            }
        }

        let payload = Value::Object(payload);
        self.trace(&format!("Flash › {payload}"));
        self.data.insert(FLASH_KEY.into(), Slot::Value(payload));
    }

    fn consume_flash(&mut self) {
        let Some(session) = self.config.session.clone() else {
            return;
        };
        match self.take_session_slot(session.as_ref()) {
            Ok(Some(payload)) => {
                self.trace(&format!("Flash › {payload}"));
                self.data.insert(FLASH_KEY.into(), Slot::Value(payload));
            }
            Ok(None) => {}
            Err(err) => self.report_session_error(&err),
        }
    }

    /// Overwrite this carrier's slot in the session's flash sub-mapping.
    fn store_session_slot(
        &self,
        session: &dyn SessionStore,
        payload: &Map<String, Value>,
    ) -> Result<(), SessionError> {
        let mut slots = match session.get(SESSION_FLASH_KEY)? {
            Some(Value::Object(slots)) => slots,
            _ => Map::new(),
        };
        slots.insert(self.config.slot_id.clone(), Value::Object(payload.clone()));
        session.put(SESSION_FLASH_KEY, Value::Object(slots))
    }

    /// Take this carrier's slot out of the session, removing the flash
    /// sub-mapping entirely once its last slot is consumed.
    fn take_session_slot(
        &self,
        session: &dyn SessionStore,
    ) -> Result<Option<Value>, SessionError> {
        let Some(Value::Object(mut slots)) = session.get(SESSION_FLASH_KEY)? else {
            return Ok(None);
        };
        let Some(payload) = slots.remove(&self.config.slot_id) else {
            return Ok(None);
        };
        if slots.is_empty() {
            session.remove(SESSION_FLASH_KEY)?;
        } else {
            session.put(SESSION_FLASH_KEY, Value::Object(slots))?;
        }
        Ok(Some(payload))
    }

    // ---- Throw ----

    /// Attach a standardized error descriptor under the `err` data key.
    ///
    /// Not control flow: nothing is raised and the call chains like every
    /// other operation. Unknown codes keep their numeric value while the
    /// name and message default to the 500 registry entry.
    pub fn throw(&mut self, request: impl Into<ThrowRequest>) -> &mut Self {
        let request = request.into();
        let code = request.code.unwrap_or(lorry_status::FALLBACK_CODE);
        let entry = lorry_status::lookup(code);

        let descriptor = ErrorDescriptor {
            name: request.name.unwrap_or_else(|| entry.name.to_string()),
            code,
            message: request
                .message
                .unwrap_or_else(|| entry.description.to_string()),
            level: request.level,
        };

        self.data.insert(
            ERR_KEY.into(),
            Slot::Value(json!({
                "name": descriptor.name,
                "code": descriptor.code,
                "message": descriptor.message,
                "level": descriptor.level,
            })),
        );
        self.report_error(&format!(
            "ERROR {} {}: {}",
            descriptor.code, descriptor.name, descriptor.message
        ));
        self
    }

    /// The last attached error descriptor, if any.
    pub fn err(&self) -> Option<&Value> {
        self.value(ERR_KEY)
    }

    /// Typed view of the last attached error descriptor.
    pub fn err_descriptor(&self) -> Option<ErrorDescriptor> {
        serde_json::from_value(self.err()?.clone()).ok()
    }

    // ---- Guard and diagnostics ----

    fn is_reserved(key: &str) -> bool {
        RESERVED_OPS.contains(&key)
    }

    /// Absorb a write targeting a reserved operation. Returns `true` when
    /// the write must not proceed. Exactly one notice is reported: on the
    /// error channel under `error_logging`, otherwise on the info channel
    /// under `verbose`.
    fn block_reserved(&self, key: &str, kind: &str) -> bool {
        if !Self::is_reserved(key) {
            return false;
        }
        let line = format!(
            "{} › {kind} BLOCKED: cannot overwrite method \"{key}\"",
            self.config.name
        );
        if self.config.error_logging {
            self.config.sink.error(&line);
        } else if self.config.verbose {
            self.config.sink.info(&line);
        }
        true
    }

    fn trace(&self, message: &str) {
        if self.config.verbose {
            self.config
                .sink
                .info(&format!("{} › {message}", self.config.name));
        }
    }

    fn report_error(&self, message: &str) {
        if self.config.error_logging {
            self.config
                .sink
                .error(&format!("{} › {message}", self.config.name));
        }
    }

    fn report_session_error(&self, err: &SessionError) {
        self.report_error(&format!("Flash › session error: {err}"));
    }
}

impl fmt::Debug for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carrier")
            .field("name", &self.config.name)
            .field("data", &self.data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::MemorySink;
    use crate::session::MemorySession;
    use proptest::prelude::*;

    fn carrier() -> Carrier {
        Carrier::new(CarrierConfig::default())
    }

    fn logging_carrier() -> (Carrier, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let config = CarrierConfig {
            name: "L".into(),
            error_logging: true,
            sink: sink.clone(),
            ..CarrierConfig::default()
        };
        (Carrier::new(config), sink)
    }

    fn session_carrier(session: &Arc<MemorySession>, slot_id: &str) -> Carrier {
        let config = CarrierConfig {
            session: Some(session.clone()),
            slot_id: slot_id.into(),
            ..CarrierConfig::default()
        };
        Carrier::new(config)
    }

    // ---- Construction ----

    #[test]
    fn with_data_merges_initial_record() {
        let c = Carrier::with_data(json!({"name": "lorry1", "value": 1}), CarrierConfig::default());
        assert_eq!(c.value("name"), Some(&json!("lorry1")));
        assert_eq!(c.value("value"), Some(&json!(1)));
    }

    #[test]
    fn empty_construction() {
        let c = carrier();
        assert!(c.is_empty());
        assert!(c.flash_payload().is_none());
        assert!(c.err().is_none());
    }

    // ---- Merge ----

    #[test]
    fn flat_merge_roundtrip() {
        let mut c = carrier();
        c.merge(json!({"key1": "value1"}));
        assert_eq!(c.value("key1"), Some(&json!("value1")));
        c.merge(json!({"key2": "value2"}));
        assert_eq!(c.value("key1"), Some(&json!("value1")));
        assert_eq!(c.value("key2"), Some(&json!("value2")));
    }

    #[test]
    fn nested_merge_recurses() {
        let mut c = carrier();
        c.merge(json!({"key3": {"one": "won"}}));
        c.merge(json!({"key3": {"two": "too"}}));
        assert_eq!(c.value("key3"), Some(&json!({"one": "won", "two": "too"})));
    }

    #[test]
    fn arrays_replace_wholesale() {
        let mut c = carrier();
        c.merge(json!({"xs": [1, 2, 3]}));
        c.merge(json!({"xs": [9]}));
        assert_eq!(c.value("xs"), Some(&json!([9])));
    }

    #[test]
    fn merge_drops_reserved_keys_silently() {
        let (mut c, sink) = logging_carrier();
        c.merge(json!({"Flash": "conflict", "Merge": "conflict", "Message": "fine"}));
        assert!(c.value("Flash").is_none());
        assert!(c.value("Merge").is_none());
        assert_eq!(c.value("Message"), Some(&json!("fine")));
        // Stripping is silent, unlike direct writes.
        assert!(sink.errors().is_empty());
    }

    #[test]
    fn merge_over_reserved_leaves_operation_invocable() {
        let mut c = carrier();
        c.merge(json!({"Throw": 123}));
        c.throw(404);
        assert_eq!(c.err_descriptor().unwrap().code, 404);
    }

    #[test]
    fn non_record_input_merges_nothing() {
        let mut c = carrier();
        c.merge(json!([1, 2, 3])).merge(json!("text")).merge(Value::Null);
        assert!(c.is_empty());
    }

    #[test]
    fn merge_traces_unstripped_input_when_verbose() {
        let sink = Arc::new(MemorySink::new());
        let config = CarrierConfig {
            name: "MyLorry".into(),
            verbose: true,
            sink: sink.clone(),
            ..CarrierConfig::default()
        };
        let mut c = Carrier::new(config);
        c.merge(json!({"Merge": 1}));
        assert_eq!(sink.infos(), vec![r#"MyLorry › Merge › {"Merge":1}"#]);
    }

    // ---- Reset / Replace ----

    #[test]
    fn reset_clears_data_but_operations_survive() {
        let mut c = carrier();
        c.merge(json!({"a": 1, "b": {"c": 2}}));
        c.flash(("t", "m"));
        c.reset();
        assert!(c.is_empty());
        assert!(c.flash_payload().is_none());
        // Every operation still works after a reset.
        c.merge(json!({"a": 2})).throw(500).flash("hello");
        assert_eq!(c.value("a"), Some(&json!(2)));
    }

    #[test]
    fn replace_is_reset_then_merge() {
        let mut a = carrier();
        a.merge(json!({"old": 1, "keep": "x"}));
        a.replace(json!({"keep": "y", "new": 2}));

        let mut b = carrier();
        b.merge(json!({"old": 1, "keep": "x"}));
        b.reset();
        b.merge(json!({"keep": "y", "new": 2}));

        assert_eq!(a.to_value(), b.to_value());
        assert!(a.value("old").is_none());
        assert_eq!(a.value("new"), Some(&json!(2)));
    }

    #[test]
    fn reset_traces_when_verbose() {
        let sink = Arc::new(MemorySink::new());
        let config = CarrierConfig {
            verbose: true,
            sink: sink.clone(),
            ..CarrierConfig::default()
        };
        Carrier::new(config).reset();
        assert_eq!(sink.infos(), vec![" › Reset"]);
    }

    // ---- Guarded accessors ----

    #[test]
    fn set_and_read_back() {
        let mut c = carrier();
        c.set("title", json!("My Great Title")).set("count", json!(5));
        assert_eq!(c.value("title"), Some(&json!("My Great Title")));
        assert_eq!(c.value("count"), Some(&json!(5)));
    }

    #[test]
    fn blocked_set_reports_one_error_line() {
        let (mut c, sink) = logging_carrier();
        c.set("Merge", json!(123));
        assert!(c.get("Merge").is_none());
        assert_eq!(
            sink.errors(),
            vec![r#"L › SET BLOCKED: cannot overwrite method "Merge""#]
        );
        // The operation is still invocable.
        c.merge(json!({"a": 1}));
        assert_eq!(c.value("a"), Some(&json!(1)));
    }

    #[test]
    fn blocked_define_reports_one_error_line() {
        let (mut c, sink) = logging_carrier();
        c.define("Flash", |_| Value::Null);
        assert!(c.get("Flash").is_none());
        assert_eq!(
            sink.errors(),
            vec![r#"L › DEFINE BLOCKED: cannot overwrite method "Flash""#]
        );
    }

    #[test]
    fn blocked_delete_reports_one_error_line() {
        let (mut c, sink) = logging_carrier();
        c.remove("Reset");
        assert_eq!(
            sink.errors(),
            vec![r#"L › DELETE BLOCKED: cannot overwrite method "Reset""#]
        );
        c.merge(json!({"tmp": 1}));
        c.reset();
        assert!(c.is_empty());
    }

    #[test]
    fn blocked_write_uses_info_channel_under_verbose_only() {
        let sink = Arc::new(MemorySink::new());
        let config = CarrierConfig {
            name: "L".into(),
            verbose: true,
            sink: sink.clone(),
            ..CarrierConfig::default()
        };
        Carrier::new(config).set("Throw", json!(1));
        assert!(sink.errors().is_empty());
        assert_eq!(
            sink.infos(),
            vec![r#"L › SET BLOCKED: cannot overwrite method "Throw""#]
        );
    }

    #[test]
    fn blocked_write_is_silent_without_logging() {
        let sink = Arc::new(MemorySink::new());
        let config = CarrierConfig {
            sink: sink.clone(),
            ..CarrierConfig::default()
        };
        Carrier::new(config).set("Merge", json!(1));
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn unreserved_delete_succeeds() {
        let (mut c, sink) = logging_carrier();
        c.set("tmp", json!(1)).remove("tmp");
        assert!(c.get("tmp").is_none());
        assert!(sink.errors().is_empty());
    }

    #[test]
    fn blocked_writes_still_chain() {
        let (mut c, _sink) = logging_carrier();
        c.set("Merge", json!(1)).set("a", json!(2)).remove("Reset").set("b", json!(3));
        assert_eq!(c.value("a"), Some(&json!(2)));
        assert_eq!(c.value("b"), Some(&json!(3)));
    }

    #[test]
    fn callable_roundtrip() {
        let mut c = carrier();
        c.define("greet", |args| {
            let name = args.first().and_then(Value::as_str).unwrap_or("stranger");
            json!(format!("Hello, {name}!"))
        });
        assert_eq!(c.call("greet", &[json!("John")]), Some(json!("Hello, John!")));
        assert_eq!(c.call("greet", &[]), Some(json!("Hello, stranger!")));
        assert!(c.call("missing", &[]).is_none());
    }

    #[test]
    fn merge_overwrites_callable_as_leaf() {
        let mut c = carrier();
        c.define("thing", |_| json!(1));
        c.merge(json!({"thing": "plain"}));
        assert_eq!(c.value("thing"), Some(&json!("plain")));
        assert!(c.call("thing", &[]).is_none());
    }

    #[test]
    fn to_value_skips_callables() {
        let mut c = carrier();
        c.set("a", json!(1)).define("f", |_| Value::Null);
        assert_eq!(c.to_value(), json!({"a": 1}));
        assert_eq!(c.len(), 2);
    }

    // ---- Flash ----

    #[test]
    fn flash_title_and_message() {
        let mut c = carrier();
        c.flash(("title", "message"));
        assert_eq!(
            c.flash_payload(),
            Some(&json!({"title": "title", "message": "message"}))
        );
    }

    #[test]
    fn flash_single_value_sets_message() {
        let mut c = carrier();
        c.flash("saved");
        assert_eq!(c.flash_payload(), Some(&json!({"message": "saved"})));
    }

    #[test]
    fn flash_prunes_absent_fields() {
        let mut c = carrier();
        c.flash(("", "only message"));
        assert_eq!(c.flash_payload(), Some(&json!({"message": "only message"})));
    }

    #[test]
    fn flash_fields_extend_payload() {
        let mut c = carrier();
        c.flash(("Saved", "All good", json!({"type": "ok"})));
        assert_eq!(
            c.flash_payload(),
            Some(&json!({"title": "Saved", "message": "All good", "type": "ok"}))
        );
    }

    #[test]
    fn flash_read_without_session_is_a_no_op() {
        let mut c = carrier();
        c.set("a", json!(1));
        c.flash(());
        assert!(c.flash_payload().is_none());
        assert_eq!(c.value("a"), Some(&json!(1)));
    }

    #[test]
    fn flash_session_roundtrip_consumes_entry() {
        let session = Arc::new(MemorySession::new());

        let mut writer = session_carrier(&session, "default");
        writer.flash(("Saved", "All good", json!({"type": "ok"})));

        let mut reader = session_carrier(&session, "default");
        reader.flash(());
        assert_eq!(
            reader.flash_payload(),
            Some(&json!({"title": "Saved", "message": "All good", "type": "ok"}))
        );

        // Consumed: a second read finds nothing and the session is clean.
        let mut late = session_carrier(&session, "default");
        late.flash(());
        assert!(late.flash_payload().is_none());
        assert!(session.is_empty());
    }

    #[test]
    fn flash_write_overwrites_pending_entry() {
        let session = Arc::new(MemorySession::new());
        session_carrier(&session, "default").flash("first");
        session_carrier(&session, "default").flash("second");

        let mut reader = session_carrier(&session, "default");
        reader.flash(());
        assert_eq!(reader.flash_payload(), Some(&json!({"message": "second"})));
    }

    #[test]
    fn flash_slots_are_isolated() {
        let session = Arc::new(MemorySession::new());
        session_carrier(&session, "formA").flash("for A");
        session_carrier(&session, "formB").flash("for B");

        let mut reader_a = session_carrier(&session, "formA");
        reader_a.flash(());
        assert_eq!(reader_a.flash_payload(), Some(&json!({"message": "for A"})));

        // formB is untouched by consuming formA.
        let mut reader_b = session_carrier(&session, "formB");
        reader_b.flash(());
        assert_eq!(reader_b.flash_payload(), Some(&json!({"message": "for B"})));
    }

    #[test]
    fn flash_traces_stored_payload_when_verbose() {
        let sink = Arc::new(MemorySink::new());
        let config = CarrierConfig {
            name: "MyLorry".into(),
            verbose: true,
            sink: sink.clone(),
            ..CarrierConfig::default()
        };
        Carrier::new(config).flash(("TestTitle", "TestMessage"));
        assert_eq!(
            sink.infos(),
            vec![r#"MyLorry › Flash › {"message":"TestMessage","title":"TestTitle"}"#]
        );
    }

    // ---- Throw ----

    #[test]
    fn throw_defaults_to_500() {
        let mut c = carrier();
        c.throw(());
        assert_eq!(
            c.err(),
            Some(&json!({
                "name": "InternalServerError",
                "code": 500,
                "message": lorry_status::lookup(500).description,
                "level": 0,
            }))
        );
    }

    #[test]
    fn throw_known_code_uses_registry_text() {
        let mut c = carrier();
        c.throw(404);
        assert_eq!(
            c.err(),
            Some(&json!({
                "name": "NotFound",
                "code": 404,
                "message": lorry_status::lookup(404).description,
                "level": 0,
            }))
        );
    }

    #[test]
    fn throw_unknown_code_keeps_number_defaults_text() {
        let mut c = carrier();
        c.throw(999);
        let descriptor = c.err_descriptor().unwrap();
        assert_eq!(descriptor.code, 999);
        assert_eq!(descriptor.name, "InternalServerError");
        assert_eq!(descriptor.message, lorry_status::lookup(500).description);
    }

    #[test]
    fn throw_shifted_text_form() {
        let mut c = carrier();
        c.throw("custom text");
        let descriptor = c.err_descriptor().unwrap();
        assert_eq!(descriptor.code, 500);
        assert_eq!(descriptor.name, "InternalServerError");
        assert_eq!(descriptor.message, "custom text");
        assert_eq!(descriptor.level, 0);
    }

    #[test]
    fn throw_shifted_full_form() {
        let mut c = carrier();
        c.throw(("Use a string to throw an error", "Test Lorry", 5));
        assert_eq!(
            c.err(),
            Some(&json!({
                "name": "Test Lorry",
                "code": 500,
                "message": "Use a string to throw an error",
                "level": 5,
            }))
        );
    }

    #[test]
    fn throw_custom_everything() {
        let mut c = carrier();
        c.throw((999, "custom error", "CustomError", 2));
        assert_eq!(
            c.err(),
            Some(&json!({
                "name": "CustomError",
                "code": 999,
                "message": "custom error",
                "level": 2,
            }))
        );
    }

    #[test]
    fn throw_logs_when_error_logging_enabled() {
        let sink = Arc::new(MemorySink::new());
        let config = CarrierConfig {
            name: "MyLorry".into(),
            error_logging: true,
            sink: sink.clone(),
            ..CarrierConfig::default()
        };
        Carrier::new(config).throw(500);
        let entry = lorry_status::lookup(500);
        assert_eq!(
            sink.errors(),
            vec![format!(
                "MyLorry › ERROR 500 {}: {}",
                entry.name, entry.description
            )]
        );
    }

    #[test]
    fn throw_is_silent_without_error_logging() {
        let sink = Arc::new(MemorySink::new());
        let config = CarrierConfig {
            sink: sink.clone(),
            ..CarrierConfig::default()
        };
        Carrier::new(config).throw(500);
        assert!(sink.lines().is_empty());
    }

    // ---- Chaining ----

    #[test]
    fn operations_chain_on_the_same_carrier() {
        let mut c = carrier();
        c.flash(("t", "m")).merge(json!({"a": 1})).throw((400, "bad"));
        assert_eq!(c.flash_payload(), Some(&json!({"title": "t", "message": "m"})));
        assert_eq!(c.value("a"), Some(&json!(1)));
        assert_eq!(c.err_descriptor().unwrap().code, 400);
    }

    // ---- Properties ----

    proptest! {
        // Lowercase keys never collide with the capitalized reserved set,
        // so a flat record always round-trips through merge.
        #[test]
        fn flat_records_roundtrip(entries in proptest::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..8)) {
            let mut c = Carrier::new(CarrierConfig::default());
            let record: Map<String, Value> = entries
                .iter()
                .map(|(k, v)| (k.clone(), json!(v)))
                .collect();
            c.merge(Value::Object(record.clone()));
            for (key, value) in &record {
                prop_assert_eq!(c.value(key), Some(value));
            }
            prop_assert_eq!(c.len(), record.len());
        }
    }
}
