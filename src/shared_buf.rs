use std::rc::Rc;

use crate::limb_vec::Limb;

/// Heap storage for a limb sequence, shared between handles until one of
/// them writes.
///
/// Cloning is O(1): both handles point at the same allocation and the
/// reference count is bumped. Every mutating method detaches first
/// (`Rc::make_mut` clones the vector when the count is above one), so a
/// write through one handle is never visible through another. Reads never
/// detach. The count is not atomic; handles stay on one thread.
#[derive(Clone, Debug)]
pub(crate) struct SharedBuf {
    inner: Rc<Vec<Limb>>,
}

impl SharedBuf {
    pub fn from_slice(limbs: &[Limb]) -> Self {
        SharedBuf { inner: Rc::new(limbs.to_vec()) }
    }

    pub fn zeroed(len: usize) -> Self {
        SharedBuf { inner: Rc::new(vec![0; len]) }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn get(&self, index: usize) -> Limb {
        self.inner[index]
    }

    pub fn as_slice(&self) -> &[Limb] {
        &self.inner
    }

    pub fn set(&mut self, index: usize, value: Limb) {
        Rc::make_mut(&mut self.inner)[index] = value;
    }

    pub fn push(&mut self, value: Limb) {
        Rc::make_mut(&mut self.inner).push(value);
    }

    pub fn pop(&mut self) -> Option<Limb> {
        Rc::make_mut(&mut self.inner).pop()
    }

    /// Appends zero limbs until the buffer holds `new_len`. Never shrinks.
    pub fn grow(&mut self, new_len: usize) {
        if new_len > self.len() {
            Rc::make_mut(&mut self.inner).resize(new_len, 0);
        }
    }

    pub fn limbs_mut(&mut self) -> &mut [Limb] {
        Rc::make_mut(&mut self.inner).as_mut_slice()
    }

    #[cfg(test)]
    pub fn shares_storage_with(&self, other: &SharedBuf) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_shares_storage() {
        let a = SharedBuf::from_slice(&[1, 2, 3]);
        let b = a.clone();
        assert!(a.shares_storage_with(&b));
    }

    #[test]
    fn reads_do_not_detach() {
        let a = SharedBuf::from_slice(&[1, 2, 3]);
        let b = a.clone();
        assert_eq!(b.get(1), 2);
        assert_eq!(b.as_slice(), &[1, 2, 3]);
        assert!(a.shares_storage_with(&b));
    }

    #[test]
    fn write_detaches_and_preserves_the_other_handle() {
        let a = SharedBuf::from_slice(&[1, 2, 3]);
        let mut b = a.clone();
        b.set(0, 9);
        assert!(!a.shares_storage_with(&b));
        assert_eq!(a.as_slice(), &[1, 2, 3]);
        assert_eq!(b.as_slice(), &[9, 2, 3]);
    }

    #[test]
    fn push_pop_detach() {
        let a = SharedBuf::from_slice(&[5]);
        let mut b = a.clone();
        b.push(6);
        assert_eq!(a.as_slice(), &[5]);
        assert_eq!(b.as_slice(), &[5, 6]);

        let mut c = b.clone();
        assert_eq!(c.pop(), Some(6));
        assert_eq!(b.as_slice(), &[5, 6]);
        assert_eq!(c.as_slice(), &[5]);
    }

    #[test]
    fn grow_appends_zeros_only() {
        let mut a = SharedBuf::from_slice(&[7]);
        a.grow(3);
        assert_eq!(a.as_slice(), &[7, 0, 0]);
        // shorter target is a no-op
        a.grow(1);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn exclusive_handle_mutates_in_place() {
        let mut a = SharedBuf::from_slice(&[1, 2]);
        for limb in a.limbs_mut() {
            *limb += 1;
        }
        assert_eq!(a.as_slice(), &[2, 3]);
    }
}
