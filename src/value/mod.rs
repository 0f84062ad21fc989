//! Lazily materialized Ion values.
//!
//! A [`ValueNode`] starts life either holding a native value or positioned over the encoded bytes
//! of one. Encoded values are decoded on first access, and any mutation moves the node to its
//! native representation and marks it dirty so that writers know it must be re-encoded.
//!
//! The per-type encoding rules live behind the [`NativeCodec`] capability trait; [`DecimalNode`]
//! is the decimal instantiation.

use std::fmt::Debug;
use std::io::Write;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{error, trace};

use crate::binary::binary_buffer::BinaryBuffer;
use crate::binary::constants::v1_0::length_codes;
use crate::binary::header::{length_code_for, Header};
use crate::binary::nibbles::nibbles_from_byte;
use crate::binary::IonTypeCode;
use crate::result::{
    decoding_error, encoding_error_raw, illegal_operation, incomplete, incomplete_error,
    null_value, IonResult,
};
use crate::types::IonType;

mod decimal;

pub use decimal::{Classification, DecimalNode};

/// The encoding rules for one Ion type: how long a native value's content is, how to read it
/// back, and how to write it.
pub trait NativeCodec {
    /// The in-memory representation of a non-null value.
    type Native: Clone + Debug;

    /// The type code expected in the upper nibble of the type descriptor.
    const TYPE_CODE: IonTypeCode;
    const ION_TYPE: IonType;

    /// The value denoted by a length code of `0`.
    fn zero() -> Self::Native;

    /// The number of content bytes `value` encodes to. This excludes the type descriptor and
    /// any VarUInt length.
    fn encoded_length(value: &Self::Native) -> usize;

    /// Decodes the `length` content bytes that begin at `offset` within `data`.
    fn decode(data: &[u8], offset: usize, length: usize) -> IonResult<Self::Native>;

    /// Writes the content bytes of `value` to `sink`, returning how many were written.
    fn write_content<W: Write>(sink: &mut W, value: &Self::Native) -> IonResult<usize>;
}

/// The location of an encoded value: the buffer that holds it, the offset of its type
/// descriptor, and the type descriptor byte itself.
#[derive(Debug, Clone)]
pub struct BufferSpan {
    data: Arc<[u8]>,
    offset: usize,
    type_descriptor: u8,
}

impl BufferSpan {
    pub fn data(&self) -> &Arc<[u8]> {
        &self.data
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn type_descriptor(&self) -> u8 {
        self.type_descriptor
    }

    fn length_code(&self) -> u8 {
        nibbles_from_byte(self.type_descriptor).1
    }
}

/// Where a [`ValueNode`]'s value currently lives.
#[derive(Debug, Clone)]
pub enum ValueState<N> {
    /// Only the encoded form exists.
    Unmaterialized(BufferSpan),
    /// The native form exists. `None` is an Ion null. `dirty` is set when the value has changed
    /// since it was last read from or written to its encoded form.
    Materialized { value: Option<N>, dirty: bool },
}

/// A single Ion value of the type described by `C`, materialized on demand.
#[derive(Debug)]
pub struct ValueNode<C: NativeCodec> {
    state: ValueState<C::Native>,
    locked: bool,
    phantom_data: PhantomData<C>,
}

impl<C: NativeCodec> ValueNode<C> {
    fn with_state(state: ValueState<C::Native>) -> Self {
        ValueNode {
            state,
            locked: false,
            phantom_data: PhantomData,
        }
    }

    /// Creates a node holding `value`. It has never been encoded, so it starts out dirty.
    pub fn new_with_value(value: C::Native) -> Self {
        Self::with_state(ValueState::Materialized {
            value: Some(value),
            dirty: true,
        })
    }

    /// Creates a node holding a typed null.
    pub fn new_null() -> Self {
        Self::with_state(ValueState::Materialized {
            value: None,
            dirty: true,
        })
    }

    /// Creates a node over the encoded value whose type descriptor is at `offset` in `data`.
    /// Only the type descriptor is read; the content is decoded on first access.
    pub fn positioned(data: Arc<[u8]>, offset: usize) -> IonResult<Self> {
        let type_descriptor = *data
            .get(offset)
            .ok_or_else(|| incomplete_error("a type descriptor", offset))?;
        Ok(Self::with_state(ValueState::Unmaterialized(BufferSpan {
            data,
            offset,
            type_descriptor,
        })))
    }

    pub fn state(&self) -> &ValueState<C::Native> {
        &self.state
    }

    /// Returns the encoded location of this value if it has not been materialized yet.
    pub fn span(&self) -> Option<&BufferSpan> {
        match &self.state {
            ValueState::Unmaterialized(span) => Some(span),
            ValueState::Materialized { .. } => None,
        }
    }

    pub fn has_native_value(&self) -> bool {
        matches!(self.state, ValueState::Materialized { .. })
    }

    pub fn is_dirty(&self) -> bool {
        matches!(self.state, ValueState::Materialized { dirty: true, .. })
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Prevents any further mutation of this node. Materializing is still permitted.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Returns `true` if this is a typed null. An unmaterialized node answers from its type
    /// descriptor without decoding anything.
    pub fn is_null(&self) -> bool {
        match &self.state {
            ValueState::Unmaterialized(span) => span.length_code() == length_codes::NULL,
            ValueState::Materialized { value, .. } => value.is_none(),
        }
    }

    /// Decodes the backing bytes into a native value. Does nothing if a native value is already
    /// present, including one that was set after the node was positioned.
    ///
    /// Materializing is not a mutation: the node is clean afterward.
    pub fn materialize(&mut self) -> IonResult<()> {
        let ValueState::Unmaterialized(span) = &self.state else {
            return Ok(());
        };
        let data = span.data.as_ref();
        let mut buffer = BinaryBuffer::new_at(data, span.offset);
        let header = buffer.read_header()?;
        if header.ion_type_code != C::TYPE_CODE {
            return decoding_error(format!(
                "expected a {} type descriptor at offset {}, found {:#04x}",
                C::ION_TYPE,
                span.offset,
                span.type_descriptor
            ));
        }

        let value = match header.length_code {
            length_codes::NULL => None,
            length_codes::ZERO => Some(C::zero()),
            length_code => {
                let length = buffer.read_length(length_code)?.value();
                if buffer.remaining() < length {
                    return incomplete("the content of a value", buffer.position());
                }
                Some(C::decode(data, buffer.position(), length)?)
            }
        };
        trace!(
            offset = span.offset,
            type_descriptor = span.type_descriptor,
            ion_type = %C::ION_TYPE,
            is_null = value.is_none(),
            "materialized value"
        );
        self.state = ValueState::Materialized {
            value,
            dirty: false,
        };
        Ok(())
    }

    fn check_unlocked(&self, operation: &str) -> IonResult<()> {
        if self.locked {
            return illegal_operation(format!("cannot {operation}: the value is locked"));
        }
        Ok(())
    }

    /// Replaces this node's value. Any backing bytes are discarded and the node becomes dirty.
    pub fn set_value(&mut self, value: C::Native) -> IonResult<()> {
        self.check_unlocked("set the value")?;
        self.state = ValueState::Materialized {
            value: Some(value),
            dirty: true,
        };
        Ok(())
    }

    /// Makes this node a typed null. Any backing bytes are discarded and the node becomes dirty.
    pub fn set_null(&mut self) -> IonResult<()> {
        self.check_unlocked("set the value to null")?;
        self.state = ValueState::Materialized {
            value: None,
            dirty: true,
        };
        Ok(())
    }

    /// Materializes the node and returns its native value, or `None` for a null.
    pub fn native_value(&mut self) -> IonResult<Option<&C::Native>> {
        self.materialize()?;
        match &self.state {
            ValueState::Materialized { value, .. } => Ok(value.as_ref()),
            // materialize() leaves no other state behind
            ValueState::Unmaterialized(_) => illegal_operation("value was not materialized"),
        }
    }

    /// Materializes the node and returns its native value. Fails with
    /// [`IonError::NullValue`](crate::IonError::NullValue) for a null.
    pub fn value(&mut self) -> IonResult<&C::Native> {
        match self.native_value()? {
            Some(value) => Ok(value),
            None => null_value(C::ION_TYPE),
        }
    }

    fn materialized_value(&self) -> IonResult<Option<&C::Native>> {
        match &self.state {
            ValueState::Materialized { value, .. } => Ok(value.as_ref()),
            ValueState::Unmaterialized(_) => {
                illegal_operation("the value must be materialized before it can be encoded")
            }
        }
    }

    /// The number of content bytes this value encodes to, excluding the type descriptor.
    /// A null has no content. Requires a native value.
    pub fn compute_encoded_length(&self) -> IonResult<usize> {
        Ok(self.materialized_value()?.map_or(0, C::encoded_length))
    }

    /// The low nibble to pair with a content length of `length`: the null marker for a null,
    /// `length` itself when it fits, otherwise the VarUInt sentinel. Requires a native value.
    pub fn compute_low_nibble(&self, length: usize) -> IonResult<u8> {
        let value = self.materialized_value()?;
        Ok(length_code_for(value.map(|_| length)))
    }

    /// Writes the content bytes of this value, which must be exactly `length` bytes long.
    ///
    /// The content is staged before anything reaches `sink`; if the codec produces a different
    /// number of bytes, nothing is written and an
    /// [`IonError::Encoding`](crate::IonError::Encoding) is returned.
    pub fn write_content<W: Write>(&self, sink: &mut W, length: usize) -> IonResult<usize> {
        let mut staged = Vec::with_capacity(length);
        if let Some(value) = self.materialized_value()? {
            C::write_content(&mut staged, value)?;
        }
        if staged.len() != length {
            error!(
                ion_type = %C::ION_TYPE,
                expected = length,
                actual = staged.len(),
                "encoded length mismatch"
            );
            return Err(encoding_error_raw(format!(
                "{} content was {} bytes long, expected {length}",
                C::ION_TYPE,
                staged.len()
            )));
        }
        sink.write_all(&staged)?;
        Ok(staged.len())
    }

    /// Writes the complete value: type descriptor, VarUInt length if needed, and content.
    /// Returns the total number of bytes written. The node is clean afterward.
    pub fn write_value<W: Write>(&mut self, sink: &mut W) -> IonResult<usize> {
        self.materialize()?;
        let length = self.compute_encoded_length()?;
        let header = Header::new(C::TYPE_CODE, self.compute_low_nibble(length)?);
        // Stage the header as well so that a failed content write leaves the sink untouched.
        let mut staged = Vec::with_capacity(length + 2);
        header.write_to(&mut staged, length)?;
        self.write_content(&mut staged, length)?;
        sink.write_all(&staged)?;
        if let ValueState::Materialized { dirty, .. } = &mut self.state {
            *dirty = false;
        }
        Ok(staged.len())
    }

    /// Returns a new, unlocked node holding a copy of this node's value. The copy has no backing
    /// bytes, so it is dirty.
    pub fn clone_value(&mut self) -> IonResult<Self> {
        let value = self.native_value()?.cloned();
        Ok(Self::with_state(ValueState::Materialized { value, dirty: true }))
    }

    /// Points this node at a different encoded value, discarding any native value. This is
    /// the only way to make a node materialize a second time.
    pub fn reposition(&mut self, data: Arc<[u8]>, offset: usize) -> IonResult<()> {
        self.check_unlocked("reposition the value")?;
        let repositioned = Self::positioned(data, offset)?;
        self.state = repositioned.state;
        Ok(())
    }
}
