//! # Object Pool
//!
//! Reusable-instance allocator for objects with short, frequent
//! lifetimes (projectiles, particles, transient effects). Slots are
//! pre-allocated once and recycled forever; running out of free slots
//! grows the pool instead of failing, trading memory for availability.
//!
//! # Thread Safety
//!
//! The pool is NOT thread-safe. Use one pool per thread or serialize
//! access externally; pools for different object types are fully
//! independent.

/// Handle to a slot in an [`ObjectPool`].
///
/// Handles are cheap to copy and hashable, so they can double as keys
/// in a spatial index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoolHandle {
    /// Index into the pool's slot array.
    index: usize,
}

/// One pooled instance plus its liveness flag.
struct PoolSlot<T> {
    /// The instance. Kept alive across release/acquire cycles.
    value: T,
    /// Whether the slot is currently handed out.
    active: bool,
}

/// A growable pool of reusable `T` instances.
///
/// # Example
///
/// ```rust,ignore
/// struct Projectile { pos: Vec2, vel: Vec2, alive_for: f32 }
///
/// let mut pool = ObjectPool::new(|| Projectile::default(), 256);
///
/// let handle = pool.acquire();
/// pool.get_mut(handle).unwrap().vel = muzzle_velocity;
/// // ... later ...
/// pool.release(handle);
/// ```
pub struct ObjectPool<T> {
    /// All slots ever created. Never shrinks.
    slots: Vec<PoolSlot<T>>,
    /// Indices of inactive slots, popped on acquire.
    free_list: Vec<usize>,
    /// Builds a fresh instance when the pool grows.
    factory: Box<dyn FnMut() -> T>,
    /// Number of currently active slots.
    acquired_count: usize,
}

impl<T> ObjectPool<T> {
    /// Creates a pool with `initial_size` pre-allocated inactive slots.
    ///
    /// The factory is retained and invoked again whenever the pool
    /// grows past its current capacity.
    #[must_use]
    pub fn new<F>(mut factory: F, initial_size: usize) -> Self
    where
        F: FnMut() -> T + 'static,
    {
        let slots: Vec<PoolSlot<T>> = (0..initial_size)
            .map(|_| PoolSlot {
                value: factory(),
                active: false,
            })
            .collect();
        let free_list: Vec<usize> = (0..initial_size).rev().collect();

        Self {
            slots,
            free_list,
            factory: Box::new(factory),
            acquired_count: 0,
        }
    }

    /// Total slots ever created (initial size plus growth).
    #[inline]
    #[must_use]
    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    /// Number of currently active slots.
    #[inline]
    #[must_use]
    pub const fn acquired_count(&self) -> usize {
        self.acquired_count
    }

    /// Number of inactive slots ready to hand out.
    #[inline]
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.free_list.len()
    }

    /// Acquires a slot, growing the pool if none is free.
    ///
    /// The returned instance keeps whatever state it had when it was
    /// last released; callers are expected to reconfigure it.
    pub fn acquire(&mut self) -> PoolHandle {
        let index = match self.free_list.pop() {
            Some(index) => index,
            None => {
                // Exhausted: grow by one slot rather than fail.
                let index = self.slots.len();
                self.slots.push(PoolSlot {
                    value: (self.factory)(),
                    active: false,
                });
                tracing::debug!(total_slots = self.slots.len(), "pool grew");
                index
            }
        };

        self.slots[index].active = true;
        self.acquired_count += 1;
        PoolHandle { index }
    }

    /// Releases a slot back to the pool.
    ///
    /// Releasing an already-inactive or out-of-range handle is a
    /// no-op: transient double-release from cleanup races must not
    /// crash a game loop or corrupt the free set.
    pub fn release(&mut self, handle: PoolHandle) {
        let Some(slot) = self.slots.get_mut(handle.index) else {
            return;
        };
        if !slot.active {
            return;
        }
        slot.active = false;
        self.free_list.push(handle.index);
        self.acquired_count -= 1;
    }

    /// Gets a reference to an active instance.
    ///
    /// Returns `None` for stale or out-of-range handles.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        let slot = self.slots.get(handle.index)?;
        slot.active.then_some(&slot.value)
    }

    /// Gets a mutable reference to an active instance.
    ///
    /// Returns `None` for stale or out-of-range handles.
    #[inline]
    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index)?;
        slot.active.then_some(&mut slot.value)
    }

    /// Releases every active slot. Capacity stays warm.
    pub fn release_all(&mut self) {
        self.free_list.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            slot.active = false;
            self.free_list.push(index);
        }
        self.acquired_count = 0;
    }

    /// Iterates over all active instances.
    pub fn iter(&self) -> impl Iterator<Item = (PoolHandle, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.active.then_some((PoolHandle { index }, &slot.value))
        })
    }

    /// Iterates mutably over all active instances.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PoolHandle, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.active.then_some((PoolHandle { index }, &mut slot.value))
            })
    }
}
