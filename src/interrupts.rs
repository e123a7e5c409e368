//! The three interrupt request lines shared between the CPU and every peripheral task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable handle onto the IRQ/NMI/RES request flags.
///
/// Peripherals hold a clone of this and call the `assert_*` methods; the CPU
/// polls `take_*` once per instruction boundary. Assertion is idempotent:
/// asserting a line that is already pending is a no-op from the CPU's point
/// of view.
#[derive(Clone)]
pub struct InterruptLines {
    irq: Arc<AtomicBool>,
    nmi: Arc<AtomicBool>,
    res: Arc<AtomicBool>,
}

impl InterruptLines {
    pub fn new() -> Self {
        InterruptLines {
            irq: Arc::new(AtomicBool::new(false)),
            nmi: Arc::new(AtomicBool::new(false)),
            res: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn assert_irq(&self) {
        self.irq.store(true, Ordering::SeqCst);
    }

    pub fn assert_nmi(&self) {
        self.nmi.store(true, Ordering::SeqCst);
    }

    pub fn assert_res(&self) {
        self.res.store(true, Ordering::SeqCst);
    }

    /// Returns whether IRQ is pending, without clearing it.
    pub fn irq_pending(&self) -> bool {
        self.irq.load(Ordering::SeqCst)
    }

    pub fn nmi_pending(&self) -> bool {
        self.nmi.load(Ordering::SeqCst)
    }

    pub fn res_pending(&self) -> bool {
        self.res.load(Ordering::SeqCst)
    }

    /// Atomically clear and return whether RES was pending.
    pub fn take_res(&self) -> bool {
        self.res.swap(false, Ordering::SeqCst)
    }

    /// Atomically clear and return whether NMI was pending.
    pub fn take_nmi(&self) -> bool {
        self.nmi.swap(false, Ordering::SeqCst)
    }

    /// Atomically clear and return whether IRQ was pending.
    pub fn take_irq(&self) -> bool {
        self.irq.swap(false, Ordering::SeqCst)
    }
}

impl Default for InterruptLines {
    fn default() -> Self {
        Self::new()
    }
}
