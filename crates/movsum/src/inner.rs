use crate::{cfg_not_sync, cfg_sync};

cfg_not_sync! {
    use core::cell::{RefCell, RefMut};

    #[cfg(not(feature = "std"))]
    use alloc::rc::Rc;
    #[cfg(feature = "std")]
    use std::rc::Rc;

    /// The guard you get from [`Inner::lock`].
    pub(crate) type Guard<'a, T> = RefMut<'a, T>;

    /// Shared window state for single-threaded use.
    pub(crate) struct Inner<T>(Rc<RefCell<T>>);

    impl<T> Inner<T> {
        #[inline(always)]
        pub fn new(val: T) -> Self {
            Self(Rc::new(RefCell::new(val)))
        }

        #[inline(always)]
        pub fn lock(&self) -> Guard<'_, T> {
            self.0.borrow_mut()
        }
    }

    impl<T> Clone for Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone())
        }
    }
}

cfg_sync! {
    use parking_lot::{Mutex, MutexGuard};
    use std::sync::Arc;

    /// The guard you get from [`Inner::lock`].
    pub(crate) type Guard<'a, T> = MutexGuard<'a, T>;

    /// Shared window state guarded by a mutex.
    ///
    /// `get` rotates and expires internally, so every caller is a writer and
    /// a read/write lock split buys nothing.
    pub(crate) struct Inner<T>(Arc<Mutex<T>>);

    impl<T> Inner<T> {
        #[inline(always)]
        pub fn new(val: T) -> Self {
            Self(Arc::new(Mutex::new(val)))
        }

        #[inline(always)]
        pub fn lock(&self) -> Guard<'_, T> {
            self.0.lock()
        }
    }

    impl<T> Clone for Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone())
        }
    }
}
