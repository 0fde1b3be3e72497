// src/backend.rs
// 设备后端接口：UI 只通过这个 trait 调用后端，真正的设备通讯在 engine 线程里
use std::sync::mpsc::Sender;
use log::warn;
use crate::params::Parameter;
use crate::types::{GuiCommand, PollingSubsystem};
/// Calls the panel makes on the device backend. All of them are fire-and-forget.
pub trait DeviceBackend {
    fn request_spectrum(&mut self);
    fn set_polling(&mut self, subsystem: PollingSubsystem, enabled: bool);
    fn pause_polling(&mut self);
    fn resume_polling(&mut self);
    fn set_setpoint(&mut self, param: Parameter, value: f64);
    fn set_channel(&mut self, subsystem: PollingSubsystem, channel: u32, on: bool);
}
/// Backend reached through the engine thread's command channel.
pub struct ChannelBackend {
    tx_cmd: Sender<GuiCommand>,
}
impl ChannelBackend {
    pub fn new(tx_cmd: Sender<GuiCommand>) -> Self {
        Self { tx_cmd }
    }
    pub fn send(&self, cmd: GuiCommand) {
        if self.tx_cmd.send(cmd).is_err() {
            warn!("backend engine is gone, command dropped");
        }
    }
}
impl DeviceBackend for ChannelBackend {
    fn request_spectrum(&mut self) {
        self.send(GuiCommand::RequestSpectrum);
    }
    fn set_polling(&mut self, subsystem: PollingSubsystem, enabled: bool) {
        self.send(GuiCommand::SetPolling(subsystem, enabled));
    }
    fn pause_polling(&mut self) {
        self.send(GuiCommand::PausePolling);
    }
    fn resume_polling(&mut self) {
        self.send(GuiCommand::ResumePolling);
    }
    fn set_setpoint(&mut self, param: Parameter, value: f64) {
        self.send(GuiCommand::SetSetpoint(param, value));
    }
    fn set_channel(&mut self, subsystem: PollingSubsystem, channel: u32, on: bool) {
        self.send(GuiCommand::SetChannel(subsystem, channel, on));
    }
}
/// In-memory backend that records every call as the command it would send.
#[cfg(test)]
#[derive(Default, Debug)]
pub struct RecordingBackend {
    pub calls: Vec<GuiCommand>,
}
#[cfg(test)]
impl RecordingBackend {
    pub fn spectrum_requests(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == GuiCommand::RequestSpectrum)
            .count()
    }
}
#[cfg(test)]
impl DeviceBackend for RecordingBackend {
    fn request_spectrum(&mut self) {
        self.calls.push(GuiCommand::RequestSpectrum);
    }
    fn set_polling(&mut self, subsystem: PollingSubsystem, enabled: bool) {
        self.calls.push(GuiCommand::SetPolling(subsystem, enabled));
    }
    fn pause_polling(&mut self) {
        self.calls.push(GuiCommand::PausePolling);
    }
    fn resume_polling(&mut self) {
        self.calls.push(GuiCommand::ResumePolling);
    }
    fn set_setpoint(&mut self, param: Parameter, value: f64) {
        self.calls.push(GuiCommand::SetSetpoint(param, value));
    }
    fn set_channel(&mut self, subsystem: PollingSubsystem, channel: u32, on: bool) {
        self.calls.push(GuiCommand::SetChannel(subsystem, channel, on));
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;
    #[test]
    fn channel_backend_forwards_commands() {
        let (tx, rx) = channel();
        let mut backend = ChannelBackend::new(tx);
        backend.request_spectrum();
        backend.set_polling(PollingSubsystem::Valves, true);
        backend.pause_polling();
        backend.set_setpoint(Parameter::XenonSetpoint, 80.0);
        backend.set_channel(PollingSubsystem::Relays, 2, true);
        let got: Vec<GuiCommand> = rx.try_iter().collect();
        assert_eq!(
            got,
            vec![
                GuiCommand::RequestSpectrum,
                GuiCommand::SetPolling(PollingSubsystem::Valves, true),
                GuiCommand::PausePolling,
                GuiCommand::SetSetpoint(Parameter::XenonSetpoint, 80.0),
                GuiCommand::SetChannel(PollingSubsystem::Relays, 2, true),
            ]
        );
    }
    #[test]
    fn closed_channel_is_not_fatal() {
        let (tx, rx) = channel();
        drop(rx);
        let mut backend = ChannelBackend::new(tx);
        backend.request_spectrum();
    }
}
