//! Dependency-property data binding.
//!
//! The [`DataBindingService`] owns a graph of typed property slots and the
//! bindings connecting them. Values are a closed sum type
//! ([`PropertyValue`]) and converters are a closed enum
//! ([`ConverterBinding`]) matched explicitly; there is no open virtual
//! hierarchy to extend.
//!
//! Failure policy: establishing a binding validates eagerly (cycles and
//! two-way rule violations are rejected with [`BindingError`] before the
//! binding exists), while per-call evaluation reports
//! [`PropertySetResult`] codes so bulk propagation never aborts on one bad
//! conversion.

use std::collections::VecDeque;

use tracing::warn;

use helio_core::math::PxRectangle;

use crate::color::UIRenderColor;
use crate::error::BindingError;

/// The kind of value a property slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyValueKind {
    /// A boolean.
    Bool,
    /// A signed 32-bit integer.
    I32,
    /// An unsigned 32-bit integer.
    U32,
    /// A 32-bit float.
    F32,
    /// A render color.
    Color,
    /// A pixel rectangle.
    Rect,
}

/// A property value (closed sum; converters match on this explicitly).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    /// A boolean.
    Bool(bool),
    /// A signed 32-bit integer.
    I32(i32),
    /// An unsigned 32-bit integer.
    U32(u32),
    /// A 32-bit float.
    F32(f32),
    /// A render color.
    Color(UIRenderColor),
    /// A pixel rectangle.
    Rect(PxRectangle),
}

impl PropertyValue {
    /// Returns the kind tag of this value.
    #[must_use]
    pub const fn kind(&self) -> PropertyValueKind {
        match self {
            Self::Bool(_) => PropertyValueKind::Bool,
            Self::I32(_) => PropertyValueKind::I32,
            Self::U32(_) => PropertyValueKind::U32,
            Self::F32(_) => PropertyValueKind::F32,
            Self::Color(_) => PropertyValueKind::Color,
            Self::Rect(_) => PropertyValueKind::Rect,
        }
    }
}

/// Identifies a property slot on an owner type.
///
/// Definitions are registered with the service that uses them; there is no
/// process-wide registry, which keeps test isolation trivial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyPropertyDefinition {
    /// The owner type name (diagnostic only).
    pub owner: &'static str,
    /// The property name.
    pub name: &'static str,
    /// The kind of value the slot holds.
    pub kind: PropertyValueKind,
}

impl DependencyPropertyDefinition {
    /// Creates a definition.
    #[must_use]
    pub const fn new(owner: &'static str, name: &'static str, kind: PropertyValueKind) -> Self {
        Self { owner, name, kind }
    }
}

/// Handle to a property instance inside a [`DataBindingService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyHandle(u32);

/// Direction(s) a binding propagates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingMode {
    /// Source changes flow to the target.
    OneWay,
    /// Source changes flow to the target and target sets convert back.
    TwoWay,
}

/// Capability flags reported by a converter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindingCaps(u32);

impl BindingCaps {
    /// The converter supports back-conversion (target -> source).
    pub const CONVERT_BACK: u32 = 1 << 0;

    /// Returns true when `flag` is set.
    #[must_use]
    pub const fn is_flagged(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    const fn with(self, flag: u32) -> Self {
        Self(self.0 | flag)
    }
}

/// Conversion applied when a binding propagates.
///
/// Multi converters declare their arity; the source count and kinds are
/// validated when the binding is evaluated, not via the type system.
#[derive(Debug, Clone, Copy)]
pub enum ConverterBinding {
    /// Pass the single source value through unchanged (both directions).
    Direct,
    /// One-way conversion of a single source.
    Convert {
        /// Forward conversion; `None` signals an unconvertible value.
        convert: fn(&PropertyValue) -> Option<PropertyValue>,
    },
    /// Two-way conversion of a single source.
    TwoWayConvert {
        /// Forward conversion.
        convert: fn(&PropertyValue) -> Option<PropertyValue>,
        /// Back conversion applied when the target is set.
        convert_back: fn(&PropertyValue) -> Option<PropertyValue>,
    },
    /// One-way conversion aggregating multiple sources.
    MultiConvert {
        /// Number of sources the converter expects.
        arity: usize,
        /// Forward conversion over all source values, in binding order.
        convert: fn(&[PropertyValue]) -> Option<PropertyValue>,
    },
    /// Two-way conversion over multiple sources.
    TwoWayMultiConvert {
        /// Number of sources the converter expects.
        arity: usize,
        /// Forward conversion over all source values.
        convert: fn(&[PropertyValue]) -> Option<PropertyValue>,
        /// Back conversion producing one value per source.
        convert_back: fn(&PropertyValue) -> Option<Vec<PropertyValue>>,
    },
}

impl ConverterBinding {
    /// Returns the capabilities of this converter.
    #[must_use]
    pub const fn get_caps(&self) -> BindingCaps {
        match self {
            Self::Direct | Self::TwoWayConvert { .. } | Self::TwoWayMultiConvert { .. } => {
                BindingCaps(0).with(BindingCaps::CONVERT_BACK)
            }
            Self::Convert { .. } | Self::MultiConvert { .. } => BindingCaps(0),
        }
    }
}

/// Outcome of setting a property or evaluating one binding.
///
/// These are result codes, not errors: bulk propagation inspects them and
/// keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertySetResult {
    /// The value was stored and differs from the previous one.
    ValueChanged,
    /// The value was stored but equals the previous one.
    ValueUnchanged,
    /// A source value could not be read or converted (wrong kind/arity).
    UnsupportedGetType,
    /// The produced value does not match the target slot's kind.
    UnsupportedSetType,
    /// The converter shape does not fit the binding (e.g. source count).
    UnsupportedBindingType,
    /// The operation is not supported (dead handle, one-way target set,
    /// missing back-conversion).
    NotSupported,
}

struct BindingRecord {
    sources: Vec<PropertyHandle>,
    converter: ConverterBinding,
    mode: BindingMode,
}

struct PropertyRecord {
    definition: DependencyPropertyDefinition,
    value: PropertyValue,
    /// The binding for which this property is the target.
    binding: Option<BindingRecord>,
    /// Targets of bindings that use this property as a source.
    targets: Vec<PropertyHandle>,
    alive: bool,
}

/// Owns the dependency-property graph and propagates value changes.
#[derive(Default)]
pub struct DataBindingService {
    records: Vec<PropertyRecord>,
    pending: VecDeque<PropertyHandle>,
}

impl DataBindingService {
    /// Creates an empty service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a property instance with an initial value.
    pub fn create_property(
        &mut self,
        definition: DependencyPropertyDefinition,
        initial: PropertyValue,
    ) -> Result<PropertyHandle, BindingError> {
        if initial.kind() != definition.kind {
            return Err(BindingError::TypeMismatch);
        }
        let handle = PropertyHandle(self.records.len() as u32);
        self.records.push(PropertyRecord {
            definition,
            value: initial,
            binding: None,
            targets: Vec::new(),
            alive: true,
        });
        Ok(handle)
    }

    /// Destroys a property, clearing every binding touching it.
    pub fn destroy_property(&mut self, handle: PropertyHandle) {
        if self.record(handle).is_none() {
            return;
        }
        self.clear_binding(handle);
        let targets = self.records[handle.0 as usize].targets.clone();
        for target in targets {
            self.clear_binding(target);
        }
        self.records[handle.0 as usize].alive = false;
    }

    /// Returns the current value of a property.
    #[must_use]
    pub fn get_value(&self, handle: PropertyHandle) -> Option<PropertyValue> {
        self.record(handle).map(|r| r.value)
    }

    /// Returns a property's definition.
    #[must_use]
    pub fn definition(&self, handle: PropertyHandle) -> Option<DependencyPropertyDefinition> {
        self.record(handle).map(|r| r.definition)
    }

    /// Sets a property value.
    ///
    /// Setting a bound target requires a two-way binding with a converter
    /// that supports back-conversion; the value then flows into the
    /// sources. Setting a one-way target is rejected with
    /// [`PropertySetResult::NotSupported`].
    pub fn set_value(&mut self, handle: PropertyHandle, value: PropertyValue) -> PropertySetResult {
        let Some(record) = self.record(handle) else {
            return PropertySetResult::NotSupported;
        };
        if value.kind() != record.definition.kind {
            return PropertySetResult::UnsupportedSetType;
        }
        if record.binding.is_some() {
            return self.set_bound_target(handle, value);
        }
        self.store_value(handle, value)
    }

    /// Establishes a binding from `sources` to `target`.
    ///
    /// The dependency graph is walked first: cycles (including binding a
    /// property to itself) are rejected before the binding exists. A
    /// two-way binding's source must not already be the target of a
    /// one-way binding. Any previous binding on `target` is replaced.
    /// The binding is evaluated once immediately.
    pub fn bind(
        &mut self,
        target: PropertyHandle,
        sources: &[PropertyHandle],
        converter: ConverterBinding,
        mode: BindingMode,
    ) -> Result<(), BindingError> {
        if self.record(target).is_none() {
            return Err(BindingError::UnknownProperty);
        }
        for source in sources {
            if self.record(*source).is_none() {
                return Err(BindingError::UnknownProperty);
            }
        }
        self.check_for_cyclic_dependencies(target, sources)?;
        if mode == BindingMode::TwoWay {
            for source in sources {
                let source_record = &self.records[source.0 as usize];
                if source_record.binding.as_ref().is_some_and(|b| b.mode == BindingMode::OneWay) {
                    return Err(BindingError::TwoWayBindingSource);
                }
            }
        }

        self.clear_binding(target);
        for source in sources {
            self.records[source.0 as usize].targets.push(target);
        }
        self.records[target.0 as usize].binding = Some(BindingRecord {
            sources: sources.to_vec(),
            converter,
            mode,
        });

        let result = self.evaluate_binding(target);
        if result == PropertySetResult::ValueChanged {
            self.mark_pending(target);
        }
        Ok(())
    }

    /// Removes the binding targeting `target`; returns true if one existed.
    pub fn clear_binding(&mut self, target: PropertyHandle) -> bool {
        let Some(binding) = self.records.get_mut(target.0 as usize).and_then(|r| r.binding.take()) else {
            return false;
        };
        for source in binding.sources {
            self.records[source.0 as usize].targets.retain(|t| *t != target);
        }
        true
    }

    /// Propagates pending source changes through the graph.
    ///
    /// Returns the number of target values that changed. Per-binding
    /// conversion failures are logged and skipped; they never abort the
    /// sweep.
    pub fn execute_changes(&mut self) -> usize {
        let mut changed = 0;
        while let Some(handle) = self.pending.pop_front() {
            let Some(record) = self.record(handle) else {
                continue;
            };
            let targets = record.targets.clone();
            for target in targets {
                match self.evaluate_binding(target) {
                    PropertySetResult::ValueChanged => {
                        changed += 1;
                        self.mark_pending(target);
                    }
                    PropertySetResult::ValueUnchanged => {}
                    result => {
                        warn!(?result, handle = target.0, "binding evaluation skipped");
                    }
                }
            }
        }
        changed
    }

    // ---------------------------------------------------------------------
    // internals
    // ---------------------------------------------------------------------

    fn record(&self, handle: PropertyHandle) -> Option<&PropertyRecord> {
        self.records.get(handle.0 as usize).filter(|r| r.alive)
    }

    fn mark_pending(&mut self, handle: PropertyHandle) {
        if !self.pending.contains(&handle) {
            self.pending.push_back(handle);
        }
    }

    fn store_value(&mut self, handle: PropertyHandle, value: PropertyValue) -> PropertySetResult {
        let record = &mut self.records[handle.0 as usize];
        if record.value == value {
            return PropertySetResult::ValueUnchanged;
        }
        record.value = value;
        self.mark_pending(handle);
        PropertySetResult::ValueChanged
    }

    fn set_bound_target(&mut self, target: PropertyHandle, value: PropertyValue) -> PropertySetResult {
        let Some(binding) = self.records[target.0 as usize].binding.as_ref() else {
            return PropertySetResult::NotSupported;
        };
        if binding.mode == BindingMode::OneWay {
            return PropertySetResult::NotSupported;
        }
        let converter = binding.converter;
        let sources = binding.sources.clone();

        let back_values: Vec<PropertyValue> = match converter {
            ConverterBinding::Direct => vec![value],
            ConverterBinding::TwoWayConvert { convert_back, .. } => match convert_back(&value) {
                Some(v) => vec![v],
                None => return PropertySetResult::UnsupportedGetType,
            },
            ConverterBinding::TwoWayMultiConvert { arity, convert_back, .. } => {
                if sources.len() != arity {
                    return PropertySetResult::UnsupportedGetType;
                }
                match convert_back(&value) {
                    Some(values) if values.len() == sources.len() => values,
                    _ => return PropertySetResult::UnsupportedGetType,
                }
            }
            ConverterBinding::Convert { .. } | ConverterBinding::MultiConvert { .. } => {
                return PropertySetResult::NotSupported;
            }
        };

        let mut any_changed = false;
        for (source, back_value) in sources.iter().zip(back_values) {
            let Some(record) = self.record(*source) else {
                return PropertySetResult::UnsupportedGetType;
            };
            if back_value.kind() != record.definition.kind {
                return PropertySetResult::UnsupportedSetType;
            }
            if self.store_value(*source, back_value) == PropertySetResult::ValueChanged {
                any_changed = true;
            }
        }

        // Re-evaluate so the target reflects the (possibly clamped)
        // converted sources right away.
        self.evaluate_binding(target);
        if any_changed {
            PropertySetResult::ValueChanged
        } else {
            PropertySetResult::ValueUnchanged
        }
    }

    fn evaluate_binding(&mut self, target: PropertyHandle) -> PropertySetResult {
        let Some(record) = self.record(target) else {
            return PropertySetResult::NotSupported;
        };
        let Some(binding) = record.binding.as_ref() else {
            return PropertySetResult::NotSupported;
        };
        let converter = binding.converter;
        let sources = binding.sources.clone();
        let target_kind = record.definition.kind;

        let mut values = Vec::with_capacity(sources.len());
        for source in &sources {
            match self.record(*source) {
                Some(r) => values.push(r.value),
                None => return PropertySetResult::UnsupportedGetType,
            }
        }

        let converted = match converter {
            ConverterBinding::Direct => {
                if values.len() != 1 {
                    return PropertySetResult::UnsupportedBindingType;
                }
                values[0]
            }
            ConverterBinding::Convert { convert } | ConverterBinding::TwoWayConvert { convert, .. } => {
                if values.len() != 1 {
                    return PropertySetResult::UnsupportedBindingType;
                }
                match convert(&values[0]) {
                    Some(v) => v,
                    None => return PropertySetResult::UnsupportedGetType,
                }
            }
            ConverterBinding::MultiConvert { arity, convert } | ConverterBinding::TwoWayMultiConvert { arity, convert, .. } => {
                if values.len() != arity {
                    return PropertySetResult::UnsupportedGetType;
                }
                match convert(&values) {
                    Some(v) => v,
                    None => return PropertySetResult::UnsupportedGetType,
                }
            }
        };

        if converted.kind() != target_kind {
            return PropertySetResult::UnsupportedSetType;
        }
        let record = &mut self.records[target.0 as usize];
        if record.value == converted {
            PropertySetResult::ValueUnchanged
        } else {
            record.value = converted;
            PropertySetResult::ValueChanged
        }
    }

    fn check_for_cyclic_dependencies(&self, target: PropertyHandle, sources: &[PropertyHandle]) -> Result<(), BindingError> {
        for source in sources {
            if *source == target {
                return Err(BindingError::CyclicBinding("can not bind to itself"));
            }
            if self.is_instance_target(target, *source) {
                return Err(BindingError::CyclicBinding("circular dependency found"));
            }
        }
        Ok(())
    }

    /// Returns true when `needle` is reachable downstream of `from`
    /// (following source -> target edges).
    fn is_instance_target(&self, from: PropertyHandle, needle: PropertyHandle) -> bool {
        if from == needle {
            return true;
        }
        let Some(record) = self.record(from) else {
            return false;
        };
        record.targets.iter().any(|t| self.is_instance_target(*t, needle))
    }
}
