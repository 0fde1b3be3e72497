// src/engine.rs
// 后台引擎：模拟 SEOP 仪器，通过 mpsc 与 GUI 通讯
use crate::config::BackendConfig;
use crate::params::Parameter;
use crate::types::*;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

const SWEEP_START_NM: f64 = 792.0;
const SWEEP_END_NM: f64 = 798.0;
const SWEEP_POINTS: usize = 200;
const RB_D1_NM: f64 = 794.98;
const READING_PERIOD: Duration = Duration::from_millis(300);

/// Stand-in for the instrument: answers commands and produces readouts.
pub struct SimulatedInstrument {
    connected: bool,
    paused: bool,
    polling: [bool; 3],
    channels: [u16; 3],
    setpoints: HashMap<Parameter, f64>,
    drop_rate: f64,
    encode_as_string: bool,
    rng: StdRng,
}

impl SimulatedInstrument {
    pub fn new(config: &BackendConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: &BackendConfig, rng: StdRng) -> Self {
        Self {
            connected: false,
            paused: false,
            polling: [false; 3],
            channels: [0; 3],
            setpoints: Parameter::ALL
                .into_iter()
                .filter(|p| p.is_setpoint())
                .map(|p| (p, p.nominal()))
                .collect(),
            drop_rate: config.drop_rate.clamp(0.0, 1.0),
            encode_as_string: false,
            rng,
        }
    }

    pub fn is_polling(&self, subsystem: PollingSubsystem) -> bool {
        self.polling[subsystem_index(subsystem)]
    }

    pub fn setpoint(&self, param: Parameter) -> Option<f64> {
        self.setpoints.get(&param).copied()
    }

    pub fn channel_bits(&self, subsystem: PollingSubsystem) -> u16 {
        self.channels[subsystem_index(subsystem)]
    }

    pub fn handle(&mut self, cmd: GuiCommand) -> Vec<BackendMessage> {
        match cmd {
            GuiCommand::Connect => {
                if self.connected {
                    return Vec::new();
                }
                self.connected = true;
                vec![
                    BackendMessage::Connection(true),
                    BackendMessage::Log("✅ Instrument connected".to_owned()),
                ]
            }
            GuiCommand::Disconnect => {
                if !self.connected {
                    return Vec::new();
                }
                self.connected = false;
                vec![
                    BackendMessage::Connection(false),
                    BackendMessage::Log("🔌 Instrument disconnected".to_owned()),
                ]
            }
            GuiCommand::RequestSpectrum => {
                if !self.connected {
                    return Vec::new();
                }
                // 模拟丢包：不回复，由 GUI 的重试定时器兜底
                if self.rng.gen_bool(self.drop_rate) {
                    debug!("simulated instrument dropped a spectrum request");
                    return Vec::new();
                }
                vec![BackendMessage::Spectrum(self.spectrum_json())]
            }
            GuiCommand::SetPolling(subsystem, enabled) => {
                self.polling[subsystem_index(subsystem)] = enabled;
                let verb = if enabled { "enabled" } else { "disabled" };
                vec![BackendMessage::Log(format!("{} polling {verb}", subsystem.label()))]
            }
            GuiCommand::PausePolling => {
                self.paused = true;
                vec![BackendMessage::Log("⏸ Polling paused".to_owned())]
            }
            GuiCommand::ResumePolling => {
                self.paused = false;
                vec![BackendMessage::Log("▶ Polling resumed".to_owned())]
            }
            GuiCommand::SetSetpoint(param, value) => {
                if !self.connected {
                    return Vec::new();
                }
                if !param.is_setpoint() || !value.is_finite() {
                    warn!("setpoint write refused: {param:?} = {value}");
                    return vec![BackendMessage::Log(format!("❌ {} not writable", param.label()))];
                }
                self.setpoints.insert(param, value);
                vec![
                    BackendMessage::Reading(param, value),
                    BackendMessage::Log(format!("set {} to {}", param.label(), param.format_value(value))),
                ]
            }
            GuiCommand::SetChannel(subsystem, channel, on) => {
                if !self.connected {
                    return Vec::new();
                }
                if channel >= subsystem.channel_count() {
                    warn!("{} has no channel {channel}", subsystem.label());
                    return Vec::new();
                }
                let word = &mut self.channels[subsystem_index(subsystem)];
                if on {
                    *word |= 1 << channel;
                } else {
                    *word &= !(1 << channel);
                }
                let state = if on { "on" } else { "off" };
                vec![
                    BackendMessage::SubsystemState(subsystem, *word),
                    BackendMessage::Log(format!("{} {state}", subsystem.channel_label(channel))),
                ]
            }
        }
    }

    /// One polling round: parameter readouts plus the enabled subsystems.
    pub fn poll(&mut self) -> Vec<BackendMessage> {
        if !self.connected || self.paused {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(Parameter::ALL.len() + PollingSubsystem::ALL.len());
        for param in Parameter::ALL {
            // 测量值围绕对应设定值抖动
            let value = match (self.setpoint(param), param.setpoint()) {
                (Some(sp), _) => sp,
                (None, Some(driver)) => {
                    let target = self.setpoint(driver).unwrap_or_else(|| param.nominal());
                    target * (1.0 + self.rng.gen_range(-0.01..0.01))
                }
                (None, None) => param.nominal() * (1.0 + self.rng.gen_range(-0.01..0.01)),
            };
            out.push(BackendMessage::Reading(param, value));
        }
        for subsystem in PollingSubsystem::ALL {
            if self.is_polling(subsystem) {
                out.push(BackendMessage::SubsystemState(subsystem, self.channel_bits(subsystem)));
            }
        }
        out
    }

    // 合成 Rb D1 吸收光谱，交替使用数组 / JSON 字符串两种编码
    fn spectrum_json(&mut self) -> String {
        let resonance = RB_D1_NM + self.rng.gen_range(-0.05..0.05);
        let drive = 795.0 + self.rng.gen_range(-0.2..0.2);
        let width = 0.15;
        let step = (SWEEP_END_NM - SWEEP_START_NM) / (SWEEP_POINTS - 1) as f64;
        let samples: Vec<f64> = (0..SWEEP_POINTS)
            .map(|i| {
                let x = SWEEP_START_NM + i as f64 * step;
                let d = (x - resonance) / width;
                let absorption = 0.8 / (1.0 + d * d);
                1.0 - absorption + self.rng.gen_range(-0.01..0.01)
            })
            .collect();
        self.encode_as_string = !self.encode_as_string;
        let samples_field = if self.encode_as_string {
            json!(serde_json::to_string(&samples).unwrap_or_default())
        } else {
            json!(samples)
        };
        json!({
            "samples": samples_field,
            "xMin": SWEEP_START_NM,
            "xMax": SWEEP_END_NM,
            "yMin": 0.0,
            "yMax": 1.1,
            "resonanceFreq": resonance,
            "driveFreq": drive,
            "status": SWEEP_POINTS - 1,
        })
        .to_string()
    }
}

fn subsystem_index(subsystem: PollingSubsystem) -> usize {
    match subsystem {
        PollingSubsystem::Relays => 0,
        PollingSubsystem::Valves => 1,
        PollingSubsystem::Fans => 2,
    }
}

pub fn spawn_thread(config: BackendConfig, tx: Sender<BackendMessage>, rx_cmd: Receiver<GuiCommand>) {
    thread::spawn(move || {
        info!(
            "simulated instrument at {}:{} (unit {})",
            config.host, config.port, config.unit_id
        );
        tx.send(BackendMessage::Log("⚙️ Instrument engine ready.".to_owned())).ok();
        let mut instrument = SimulatedInstrument::new(&config);
        let mut last_poll = Instant::now();

        loop {
            // 1. 处理 GUI 命令
            for _ in 0..10 {
                match rx_cmd.try_recv() {
                    Ok(cmd) => {
                        for msg in instrument.handle(cmd) {
                            tx.send(msg).ok();
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        info!("GUI gone, instrument engine stopping");
                        return;
                    }
                }
            }

            // 2. 周期性读数
            if last_poll.elapsed() >= READING_PERIOD {
                last_poll = Instant::now();
                for msg in instrument.poll() {
                    tx.send(msg).ok();
                }
            }

            thread::sleep(Duration::from_millis(20));
        }
    });
}
