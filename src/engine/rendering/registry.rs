//! ### English
//! Process-wide "current canvas per thread" registry.
//!
//! Entries are weak: registering a canvas never extends its lifetime, and an entry whose canvas
//! has been dropped reads as empty. Entries live in thread-local storage, so a thread's entry is
//! released when that thread exits.
//!
//! ### 中文
//! 进程级的“每线程 current canvas”登记表。
//!
//! 表项为弱引用：登记不会延长 canvas 的生命周期；canvas 被 drop 后对应表项视为空。
//! 表项存放在线程局部存储中，线程退出时其表项随之释放。

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, Weak};

/// ### English
/// Something that can re-activate its rendering context on the calling thread.
///
/// ### 中文
/// 能够在调用线程上重新激活其渲染上下文的对象。
pub trait ThreadContextOwner: Send + Sync {
    fn make_current(&self) -> bool;
}

/// ### English
/// Address used to compare registry entries by identity.
///
/// ### 中文
/// 用于按身份比较表项的地址。
pub(crate) fn owner_key<T: ?Sized>(owner: *const T) -> usize {
    owner.cast::<()>() as usize
}

type OwnerSlots = HashMap<usize, Weak<dyn ThreadContextOwner>>;

/// ### English
/// Calling thread's entries, keyed by registry id. Dropped with the thread.
///
/// ### 中文
/// 调用线程的表项，以登记表 id 为键。随线程退出一起释放。
thread_local! {
    static OWNERS: RefCell<OwnerSlots> = RefCell::new(HashMap::new());
}

static NEXT_REGISTRY_ID: AtomicUsize = AtomicUsize::new(0);
static GLOBAL: OnceLock<ThreadContextRegistry> = OnceLock::new();

/// ### English
/// Maps each thread to at most one registered owner. Every method acts on the calling thread's
/// entry.
///
/// ### 中文
/// 每个线程最多对应一个登记的 owner。所有方法都作用于调用线程的表项。
pub struct ThreadContextRegistry {
    id: usize,
}

impl Default for ThreadContextRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadContextRegistry {
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// ### English
    /// The process registry, created on first use.
    ///
    /// ### 中文
    /// 进程级登记表，首次使用时创建。
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    /// ### English
    /// The process registry if something has already created it.
    ///
    /// ### 中文
    /// 若进程级登记表已被创建则返回它。
    pub fn get() -> Option<&'static Self> {
        GLOBAL.get()
    }

    /// ### English
    /// Runs `f` on the calling thread's slots. Returns `None` once thread-local storage has been
    /// torn down (a canvas dropped from another thread-local destructor).
    ///
    /// ### 中文
    /// 在调用线程的表项上执行 `f`。线程局部存储已销毁时（例如在其它线程局部析构中 drop canvas）
    /// 返回 `None`。
    fn with_slots<R>(&self, f: impl FnOnce(&mut OwnerSlots) -> R) -> Option<R> {
        OWNERS
            .try_with(|owners| owners.try_borrow_mut().ok().map(|mut owners| f(&mut owners)))
            .ok()
            .flatten()
    }

    /// ### English
    /// Records `owner` for the calling thread, replacing any previous entry.
    ///
    /// ### 中文
    /// 为调用线程记录 `owner`，替换已有表项。
    pub fn set_owner(&self, owner: Weak<dyn ThreadContextOwner>) {
        self.with_slots(|owners| {
            owners.insert(self.id, owner);
        });
    }

    /// ### English
    /// Removes the calling thread's entry only if it points at the owner identified by `key`.
    /// Returns whether an entry was removed.
    ///
    /// ### 中文
    /// 仅当调用线程的表项指向 `key` 所标识的 owner 时才移除。返回是否移除了表项。
    pub fn clear_owner(&self, key: usize) -> bool {
        self.with_slots(|owners| {
            let registered = owners
                .get(&self.id)
                .is_some_and(|owner| owner_key(owner.as_ptr()) == key);
            if registered {
                owners.remove(&self.id);
            }
            registered
        })
        .unwrap_or(false)
    }

    /// ### English
    /// Live owner registered for the calling thread. Expired entries yield `None`.
    ///
    /// ### 中文
    /// 调用线程当前登记且仍存活的 owner。已失效的表项返回 `None`。
    pub fn owner(&self) -> Option<Arc<dyn ThreadContextOwner>> {
        self.with_slots(|owners| owners.get(&self.id).and_then(Weak::upgrade))
            .flatten()
    }

    /// ### English
    /// Whether the calling thread's entry (live or expired) belongs to the owner identified by
    /// `key`.
    ///
    /// ### 中文
    /// 调用线程的表项（无论是否存活）是否属于 `key` 所标识的 owner。
    pub fn is_owner(&self, key: usize) -> bool {
        self.with_slots(|owners| {
            owners
                .get(&self.id)
                .is_some_and(|owner| owner_key(owner.as_ptr()) == key)
        })
        .unwrap_or(false)
    }

    pub fn has_entry(&self) -> bool {
        self.with_slots(|owners| owners.contains_key(&self.id))
            .unwrap_or(false)
    }
}
