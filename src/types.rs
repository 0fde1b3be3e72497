// src/types.rs
use crate::params::Parameter;

// 可单独开关轮询的设备子系统（随当前面板切换）
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum PollingSubsystem {
    Relays,
    Valves,
    Fans,
}

impl PollingSubsystem {
    pub const ALL: [PollingSubsystem; 3] = [
        PollingSubsystem::Relays,
        PollingSubsystem::Valves,
        PollingSubsystem::Fans,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PollingSubsystem::Relays => "Relays",
            PollingSubsystem::Valves => "Valves",
            PollingSubsystem::Fans => "Fans",
        }
    }

    /// Number of channels packed into the subsystem's state word.
    pub fn channel_count(self) -> u32 {
        match self {
            PollingSubsystem::Relays => 7,
            PollingSubsystem::Valves => 7,
            PollingSubsystem::Fans => 11,
        }
    }

    // 通道名称：继电器按接线用途命名
    pub fn channel_label(self, channel: u32) -> String {
        match self {
            PollingSubsystem::Relays => match channel {
                0 => "Water chiller".to_owned(),
                1 => "Magnet PSU".to_owned(),
                2 => "Laser PSU".to_owned(),
                3 => "Vacuum pump".to_owned(),
                4 => "Vacuum gauge".to_owned(),
                5 => "PID controller".to_owned(),
                6 => "OP cell heating".to_owned(),
                n => format!("Relay {}", n + 1),
            },
            PollingSubsystem::Valves => format!("Valve X{}", channel + 6),
            PollingSubsystem::Fans => format!("Fan {}", channel + 1),
        }
    }
}

// GUI 发给后台的命令
#[derive(Clone, Debug, PartialEq)]
pub enum GuiCommand {
    Connect,
    Disconnect,
    RequestSpectrum,
    SetPolling(PollingSubsystem, bool),
    PausePolling,
    ResumePolling,
    SetSetpoint(Parameter, f64),             // 写设定值
    SetChannel(PollingSubsystem, u32, bool), // 单个继电器/阀门/风扇开关
}

// 后台发给 GUI 的消息
#[derive(Clone, Debug, PartialEq)]
pub enum BackendMessage {
    Log(String),
    Connection(bool),           // 连接状态
    Spectrum(String),           // 光谱原始 JSON，入口处统一解码
    Reading(Parameter, f64),    // 参数读数
    SubsystemState(PollingSubsystem, u16), // 继电器/阀门/风扇位图
}
