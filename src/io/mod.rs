//! Memory-mapped I/O controller.
//!
//! A bus device backed by an atomic register file (VRAM plus the scalar
//! control registers). Writes update the backing byte and then dispatch on
//! the written offset to trigger the side effects in the register map below.
//! Peripheral behavior (clocks, timers, counters, drawing, rendering, input)
//! runs on its own `std::thread`, each polling `shutdown` at its suspension
//! point.

pub mod audio;
pub mod draw;
pub mod host;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::bus::{BusDevice, BusPeekResult};
use crate::config;
use crate::error::EmulatorError;
use crate::interrupts::InterruptLines;
use draw::DrawInstruction;
use host::{AudioChannel, EventSource, Headless, RenderConfig, Renderer};

struct DrawQueue {
    queue: Mutex<VecDeque<DrawInstruction>>,
    ready: Condvar,
}

/// The memory-mapped I/O controller: VRAM, control registers, clocks, timers,
/// counters, the drawing pipeline and the event source, as a single bus device.
pub struct IoController {
    regs: Arc<Vec<AtomicU8>>,
    draw_queue: Arc<DrawQueue>,
    audio: Mutex<[Box<dyn AudioChannel>; 3]>,
    counter_armed: [Arc<AtomicBool>; 2],
    interrupts: InterruptLines,
    shutdown: Arc<AtomicBool>,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl IoController {
    pub fn new(interrupts: InterruptLines) -> Self {
        let mut regs = Vec::with_capacity(config::io::REGISTER_FILE_SIZE);
        regs.resize_with(config::io::REGISTER_FILE_SIZE, || AtomicU8::new(0));
        IoController {
            regs: Arc::new(regs),
            draw_queue: Arc::new(DrawQueue {
                queue: Mutex::new(VecDeque::new()),
                ready: Condvar::new(),
            }),
            audio: Mutex::new([
                Box::new(Headless),
                Box::new(Headless),
                Box::new(Headless),
            ]),
            counter_armed: [
                Arc::new(AtomicBool::new(false)),
                Arc::new(AtomicBool::new(false)),
            ],
            interrupts,
            shutdown: Arc::new(AtomicBool::new(false)),
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Take ownership of the host backends and spawn every fixed peripheral thread.
    pub fn start(
        &self,
        renderer: Box<dyn Renderer>,
        audio: [Box<dyn AudioChannel>; 3],
        events: Box<dyn EventSource>,
    ) {
        *self.audio.lock().unwrap() = audio;
        let mut handles = self.handles.lock().unwrap();
        handles.push(self.spawn_clock(config::io::CLOCK1, config::event::CLOCK1));
        handles.push(self.spawn_clock(config::io::CLOCK2, config::event::CLOCK2));
        handles.push(self.spawn_event_source(events));
        handles.push(self.spawn_drawing_consumer());
        handles.push(self.spawn_renderer(renderer));
    }

    /// Signal every peripheral thread to exit and join it. Returns an error
    /// if a backend thread panicked while tearing down; armed one-shot
    /// timers and counters are not cancelled but exit on their next wakeup.
    pub fn stop(&self) -> Result<(), EmulatorError> {
        self.shutdown.store(true, Ordering::SeqCst);
        self.draw_queue.ready.notify_all();
        self.audio.lock().unwrap().iter_mut().for_each(|ch| ch.stop());
        let mut handles = self.handles.lock().unwrap();
        for handle in handles.drain(..) {
            if let Err(panic) = handle.join() {
                let msg = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "peripheral thread panicked".to_string());
                return Err(EmulatorError::HostFailure(msg));
            }
        }
        Ok(())
    }

    /// Current CONTROL byte, for diagnostics.
    pub fn control_byte(&self) -> u8 {
        self.regs[config::io::CONTROL as usize].load(Ordering::SeqCst)
    }

    fn spawn_clock(&self, reg_offset: u16, event_code: u8) -> JoinHandle<()> {
        let regs = Arc::clone(&self.regs);
        let interrupts = self.interrupts.clone();
        let shutdown = Arc::clone(&self.shutdown);
        thread::spawn(move || {
            while !shutdown.load(Ordering::SeqCst) {
                let value = regs[reg_offset as usize].load(Ordering::SeqCst);
                if value == 0 {
                    thread::sleep(Duration::from_millis(config::IDLE_POLL_MS));
                    continue;
                }
                thread::sleep(Duration::from_millis(config::CLOCK_UNIT_MS * u64::from(value)));
                if shutdown.load(Ordering::SeqCst) {
                    break;
                }
                regs[config::io::EVENT_TYPE as usize].store(event_code, Ordering::SeqCst);
                interrupts.assert_irq();
            }
        })
    }

    fn arm_timer(&self, lo_offset: u16, hi_offset: u16, event_code: u8) {
        let regs = Arc::clone(&self.regs);
        let interrupts = self.interrupts.clone();
        let shutdown = Arc::clone(&self.shutdown);
        let lo = u16::from(regs[lo_offset as usize].load(Ordering::SeqCst));
        let hi = u16::from(regs[hi_offset as usize].load(Ordering::SeqCst));
        let duration = Duration::from_millis(config::TIMER_UNIT_MS * u64::from((hi << 8) | lo));
        let handle = thread::spawn(move || {
            thread::sleep(duration);
            if shutdown.load(Ordering::SeqCst) {
                return;
            }
            regs[config::io::EVENT_TYPE as usize].store(event_code, Ordering::SeqCst);
            interrupts.assert_irq();
        });
        self.handles.lock().unwrap().push(handle);
    }

    fn arm_counter(&self, index: usize, reg_offset: u16, event_code: u8) {
        if self.counter_armed[index].swap(true, Ordering::SeqCst) {
            // already counting down; the running thread will observe the new value
            return;
        }
        let regs = Arc::clone(&self.regs);
        let interrupts = self.interrupts.clone();
        let shutdown = Arc::clone(&self.shutdown);
        let armed = Arc::clone(&self.counter_armed[index]);
        let handle = thread::spawn(move || {
            loop {
                thread::sleep(Duration::from_millis(config::COUNTER_PERIOD_MS));
                if shutdown.load(Ordering::SeqCst) {
                    break;
                }
                let current = regs[reg_offset as usize].load(Ordering::SeqCst);
                if current == 0 {
                    break;
                }
                regs[config::io::EVENT_TYPE as usize].store(event_code, Ordering::SeqCst);
                interrupts.assert_irq();
                regs[reg_offset as usize].store(current - 1, Ordering::SeqCst);
            }
            armed.store(false, Ordering::SeqCst);
        });
        self.handles.lock().unwrap().push(handle);
    }

    fn spawn_event_source(&self, mut events: Box<dyn EventSource>) -> JoinHandle<()> {
        let regs = Arc::clone(&self.regs);
        let interrupts = self.interrupts.clone();
        let shutdown = Arc::clone(&self.shutdown);
        thread::spawn(move || {
            while !shutdown.load(Ordering::SeqCst) {
                match events.poll() {
                    Some(event) => {
                        let control = regs[config::io::CONTROL as usize].load(Ordering::SeqCst);
                        post_input_event(&regs, &interrupts, control, event);
                    }
                    None => thread::sleep(Duration::from_millis(config::CLOCK_UNIT_MS)),
                }
            }
        })
    }

    fn spawn_drawing_consumer(&self) -> JoinHandle<()> {
        let regs = Arc::clone(&self.regs);
        let draw_queue = Arc::clone(&self.draw_queue);
        let shutdown = Arc::clone(&self.shutdown);
        thread::spawn(move || {
            let mut brush_body = 0u8;
            let mut brush_outline = 0u8;
            loop {
                let instr = {
                    let mut queue = draw_queue.queue.lock().unwrap();
                    loop {
                        if let Some(instr) = queue.pop_front() {
                            break Some(instr);
                        }
                        if shutdown.load(Ordering::SeqCst) {
                            break None;
                        }
                        queue = draw_queue.ready.wait(queue).unwrap();
                    }
                };
                let instr = match instr {
                    Some(instr) => instr,
                    None => break,
                };
                let mut vram = vec![0u8; config::io::VRAM_SIZE];
                for (i, slot) in vram.iter_mut().enumerate() {
                    *slot = regs[i].load(Ordering::Relaxed);
                }
                draw::apply(instr, &mut vram, &mut brush_body, &mut brush_outline);
                for (i, byte) in vram.iter().enumerate() {
                    regs[i].store(*byte, Ordering::Relaxed);
                }
            }
        })
    }

    fn spawn_renderer(&self, mut renderer: Box<dyn Renderer>) -> JoinHandle<()> {
        let regs = Arc::clone(&self.regs);
        let shutdown = Arc::clone(&self.shutdown);
        thread::spawn(move || {
            while !shutdown.load(Ordering::SeqCst) {
                let control = regs[config::io::CONTROL as usize].load(Ordering::SeqCst);
                let cfg = RenderConfig {
                    text_mode: control & config::control::TEXT_MODE != 0,
                    hidden: control & config::control::HIDDEN != 0,
                    fullscreen: control & config::control::FULLSCREEN != 0,
                    portrait: control & config::control::PORTRAIT != 0,
                    bg_color: regs[config::io::BG_COLOR as usize].load(Ordering::Relaxed),
                    fg_color: regs[config::io::FG_COLOR as usize].load(Ordering::Relaxed),
                };
                let mut vram = vec![0u8; config::io::VRAM_SIZE];
                for (i, slot) in vram.iter_mut().enumerate() {
                    *slot = regs[i].load(Ordering::Relaxed);
                }
                renderer.present(&vram, cfg);
                let interval = if cfg.hidden {
                    config::IDLE_POLL_MS
                } else {
                    config::RENDER_INTERVAL_MS
                };
                thread::sleep(Duration::from_millis(interval));
            }
        })
    }
}

fn post_input_event(
    regs: &[AtomicU8],
    interrupts: &InterruptLines,
    control: u8,
    event: host::InputEvent,
) {
    use config::{control as ctl, event as ev, io};
    use host::InputEvent::*;

    let (code, payload) = match event {
        KeyDown { keycode, modifiers } if control & ctl::KEYBOARD_DISABLED == 0 => {
            (ev::KEYDOWN, [keycode, modifiers])
        }
        KeyUp { keycode, modifiers } if control & ctl::KEYBOARD_DISABLED == 0 => {
            (ev::KEYUP, [keycode, modifiers])
        }
        MouseMove { x, y } if control & ctl::MOUSE_DISABLED == 0 => (ev::MOUSEMOVE, [x, y]),
        MouseDown { x, y } if control & ctl::MOUSE_DISABLED == 0 => (ev::MOUSEDOWN, [x, y]),
        MouseUp { x, y } if control & ctl::MOUSE_DISABLED == 0 => (ev::MOUSEUP, [x, y]),
        _ => return,
    };
    regs[io::EVENT_PAYLOAD_0 as usize].store(payload[0], Ordering::SeqCst);
    regs[io::EVENT_PAYLOAD_1 as usize].store(payload[1], Ordering::SeqCst);
    regs[io::EVENT_TYPE as usize].store(code, Ordering::SeqCst);
    interrupts.assert_irq();
}

impl BusDevice for IoController {
    fn read(&mut self, addr: u16, last_bus_value: u8) -> u8 {
        self.peek(addr).unwrap(last_bus_value)
    }

    fn peek(&self, addr: u16) -> BusPeekResult {
        match self.regs.get(addr as usize) {
            Some(cell) => BusPeekResult::Result(cell.load(Ordering::SeqCst)),
            None => BusPeekResult::Unmapped,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        if (addr as usize) >= self.regs.len() {
            return;
        }
        self.regs[addr as usize].store(value, Ordering::SeqCst);

        match addr {
            config::io::DRAW_METHOD => {
                let a1 = self.regs[config::io::DRAW_ARG1 as usize].load(Ordering::SeqCst);
                let a2 = self.regs[config::io::DRAW_ARG2 as usize].load(Ordering::SeqCst);
                let a3 = self.regs[config::io::DRAW_ARG3 as usize].load(Ordering::SeqCst);
                let a4 = self.regs[config::io::DRAW_ARG4 as usize].load(Ordering::SeqCst);
                let instr = DrawInstruction { method: value, a1, a2, a3, a4 };
                self.draw_queue.queue.lock().unwrap().push_back(instr);
                self.draw_queue.ready.notify_one();
            }
            config::io::AUDIO1 => self.audio.lock().unwrap()[0].apply(audio::decode(value)),
            config::io::AUDIO2 => self.audio.lock().unwrap()[1].apply(audio::decode(value)),
            config::io::AUDIO3 => self.audio.lock().unwrap()[2].apply(audio::decode(value)),
            config::io::TIMER1_LO => {
                self.arm_timer(config::io::TIMER1_LO, config::io::TIMER1_HI, config::event::TIMER1)
            }
            config::io::TIMER2_LO => {
                self.arm_timer(config::io::TIMER2_LO, config::io::TIMER2_HI, config::event::TIMER2)
            }
            config::io::COUNTER1 if value != 0 => {
                self.arm_counter(0, config::io::COUNTER1, config::event::COUNTER1)
            }
            config::io::COUNTER2 if value != 0 => {
                self.arm_counter(1, config::io::COUNTER2, config::event::COUNTER2)
            }
            _ => {}
        }
    }
}
