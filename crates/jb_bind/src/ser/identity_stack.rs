use alloc::vec::Vec;
use core::fmt;

use crate::Bindable;
use crate::info::TypeInfo;

/// One instance being serialized: its address and type.
#[derive(Clone, Copy)]
struct Frame {
    addr: usize,
    info: &'static TypeInfo,
}

impl Frame {
    fn of(value: &dyn Bindable) -> Self {
        Self {
            addr: (value as *const dyn Bindable).cast::<()>() as usize,
            info: value.bind_type_info(),
        }
    }

    /// Same instance. Address alone is not enough: a struct and its first
    /// field share one.
    fn is(&self, other: &Frame) -> bool {
        self.addr == other.addr && self.info.ty() == other.info.ty()
    }
}

/// The instances whose serialization is in progress, outermost first.
#[derive(Default, Clone)]
pub(super) struct IdentityStack {
    stack: Vec<Frame>,
}

impl IdentityStack {
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Pushes `value`, `false` if it is already on the stack.
    pub fn push(&mut self, value: &dyn Bindable) -> bool {
        let frame = Frame::of(value);
        if self.stack.iter().any(|open| open.is(&frame)) {
            return false;
        }
        self.stack.push(frame);
        true
    }

    pub fn pop(&mut self) {
        self.stack.pop();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stack.len()
    }
}

impl fmt::Debug for IdentityStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.stack.iter();

        if let Some(first) = iter.next() {
            writeln!(f, "`{}`", first.info.type_path())?;
        }

        for frame in iter {
            writeln!(f, " -> `{}`", frame.info.type_path())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::IdentityStack;

    #[test]
    fn detects_reentry() {
        let outer = String::from("a");
        let inner = String::from("a");
        let mut stack = IdentityStack::new();

        assert!(stack.push(&outer));
        assert!(stack.push(&inner));
        assert!(!stack.push(&outer));
        stack.pop();
        stack.pop();
        assert!(stack.push(&outer));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn same_address_different_type() {
        let outer = Some(String::from("a"));
        let mut stack = IdentityStack::new();

        assert!(stack.push(&outer));
        let inner = outer.as_ref().unwrap();
        assert!(stack.push(inner));
        assert!(!stack.push(inner));
    }
}
