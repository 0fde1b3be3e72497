// src/gui.rs
use eframe::egui;
use egui::Color32;
use egui_plot::{Line, Plot, PlotBounds, PlotPoints, VLine};
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};
use crate::backend::{ChannelBackend, DeviceBackend};
use crate::config::PanelConfig;
use crate::engine;
use crate::export::{self, PlotStyle};
use crate::params::{Parameter, ParameterGroup};
use crate::spectrum::{
    MarkerKind, RenderReport, RetryScheduler, SpectrumChart, SpectrumError, SpectrumPayload,
    SpectrumRenderer,
};
use crate::types::*;

const SNAPSHOT_FILE: &str = "spectrum_snapshot.png";

// 中央区域的面板，切换时开关对应子系统的轮询
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Panel {
    Spectrum,
    Subsystem(PollingSubsystem),
}

impl Panel {
    fn label(self) -> &'static str {
        match self {
            Panel::Spectrum => "Spectrum",
            Panel::Subsystem(s) => s.label(),
        }
    }

    fn subsystem(self) -> Option<PollingSubsystem> {
        match self {
            Panel::Spectrum => None,
            Panel::Subsystem(s) => Some(s),
        }
    }
}

pub struct SeopPanelApp {
    // 系统状态
    is_connected: bool,
    panel: Panel,
    endpoint: String,

    // 光谱渲染
    renderer: SpectrumRenderer,
    chart: SpectrumChart,
    retry: RetryScheduler,
    last_report: Option<RenderReport>,

    // 设备读数
    readings: HashMap<Parameter, f64>,
    subsystem_bits: HashMap<PollingSubsystem, u16>,

    // 界面日志
    log_messages: Vec<String>,

    // 通讯管道
    rx: Receiver<BackendMessage>,
    backend: ChannelBackend,
}

impl SeopPanelApp {
    pub fn new(config: PanelConfig) -> Self {
        let (tx, rx) = channel();
        let (tx_cmd, rx_cmd) = channel();

        let endpoint = format!(
            "{}:{} (unit {})",
            config.backend.host, config.backend.port, config.backend.unit_id
        );
        // 启动后台引擎
        engine::spawn_thread(config.backend.clone(), tx, rx_cmd);

        Self {
            is_connected: false,
            panel: Panel::Spectrum,
            endpoint,
            renderer: SpectrumRenderer::new(config.axis, config.render),
            chart: SpectrumChart::new(config.render.marker_slots),
            retry: RetryScheduler::new(config.retry.interval()),
            last_report: None,
            readings: HashMap::new(),
            subsystem_bits: HashMap::new(),
            log_messages: vec!["SEOP Panel ready.".to_owned()],
            rx,
            backend: ChannelBackend::new(tx_cmd),
        }
    }

    fn log(&mut self, msg: &str) {
        self.log_messages.push(format!("> {}", msg));
        if self.log_messages.len() > 8 { self.log_messages.remove(0); }
    }

    // 入口：解码一次，交给渲染核心
    fn ingest_spectrum(&mut self, text: &str) {
        let payload = match SpectrumPayload::from_json(text) {
            Ok(p) => p,
            Err(err) => {
                warn!("spectrum message rejected: {err}");
                self.log("Spectrum: malformed payload");
                return;
            }
        };
        match self.renderer.update_graph(&mut self.chart, &payload) {
            Ok(report) => {
                if report.produced < report.consumed {
                    info!("spectrum: {} of {} samples plotted", report.produced, report.consumed);
                }
                self.last_report = Some(report);
            }
            Err(SpectrumError::NoData) => self.log("Spectrum: no data"),
            Err(err) => self.log(&format!("Spectrum: {err}")),
        }
    }

    fn switch_panel(&mut self, next: Panel) {
        switch_polling(&mut self.backend, self.panel, next);
        self.panel = next;
    }

    fn save_snapshot(&mut self) {
        match export::save_snapshot(&self.chart, &PlotStyle::default(), Path::new(SNAPSHOT_FILE)) {
            Ok(()) => self.log(&format!("Saved {}", SNAPSHOT_FILE)),
            Err(err) => {
                warn!("snapshot failed: {err:#}");
                self.log("Snapshot failed");
            }
        }
    }

    fn draw_spectrum(&self, ui: &mut egui::Ui) {
        Plot::new("spectrum_plot")
            .view_aspect(2.0)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                if let (Some(x), Some(y)) = (self.chart.x_axis(), self.chart.y_axis()) {
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                        [x.range.min, y.min],
                        [x.range.max, y.max],
                    ));
                    for tick in x.ticks() {
                        plot_ui.vline(VLine::new(tick).color(Color32::from_gray(45)));
                    }
                }
                let points: Vec<[f64; 2]> = self.chart.curve().iter().map(|p| p.to_array()).collect();
                if !points.is_empty() {
                    plot_ui.line(
                        Line::new(PlotPoints::new(points))
                            .name("Spectrum")
                            .color(Color32::from_rgb(0, 255, 255)),
                    );
                }
                for kind in MarkerKind::ALL {
                    let col = marker_color(kind);
                    for dash in self.chart.marker(kind).dashes() {
                        plot_ui.line(
                            Line::new(PlotPoints::new(dash.endpoints().to_vec()))
                                .color(col)
                                .width(2.0),
                        );
                    }
                }
            });

        if let Some(report) = &self.last_report {
            ui.horizontal(|ui| {
                ui.label(format!("Points: {}/{}", report.produced, report.consumed));
                for kind in MarkerKind::ALL {
                    let text = match report.marker(kind) {
                        Ok(_) => format!("{}: shown", kind.label()),
                        Err(rejection) => format!("{}: hidden ({rejection})", kind.label()),
                    };
                    ui.label(egui::RichText::new(text).color(marker_color(kind)).small());
                }
            });
        }
    }

    fn draw_subsystem(&mut self, ui: &mut egui::Ui, subsystem: PollingSubsystem) {
        let Some(bits) = self.subsystem_bits.get(&subsystem).copied() else {
            ui.label("Waiting for data...");
            return;
        };
        let mut toggled = None;
        ui.horizontal_wrapped(|ui| {
            for ch in 0..subsystem.channel_count() {
                let on = bits & (1 << ch) != 0;
                let col = if on { Color32::GREEN } else { Color32::DARK_GRAY };
                let text = egui::RichText::new(subsystem.channel_label(ch)).color(col);
                let btn = ui.add_enabled(self.is_connected, egui::SelectableLabel::new(on, text));
                if btn.clicked() {
                    toggled = Some((ch, !on));
                }
            }
        });
        if let Some((ch, on)) = toggled {
            self.backend.set_channel(subsystem, ch, on);
        }
    }
}

/// Hands polling over from one panel's subsystem to the next one's:
/// pause, old off, new on, resume. Nothing is sent when the panel stays.
pub fn switch_polling(backend: &mut dyn DeviceBackend, from: Panel, to: Panel) {
    if from == to {
        return;
    }
    backend.pause_polling();
    if let Some(old) = from.subsystem() {
        backend.set_polling(old, false);
    }
    if let Some(new) = to.subsystem() {
        backend.set_polling(new, true);
    }
    backend.resume_polling();
}

fn marker_color(kind: MarkerKind) -> Color32 {
    match kind {
        MarkerKind::Resonance => Color32::from_rgb(255, 80, 80),
        MarkerKind::Drive => Color32::from_rgb(120, 220, 120),
    }
}

impl eframe::App for SeopPanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // 1. 消息处理 loop
        let mut msg_count = 0;
        while let Ok(msg) = self.rx.try_recv() {
            msg_count += 1;
            match msg {
                BackendMessage::Log(s) => self.log(&s),
                BackendMessage::Connection(b) => {
                    self.is_connected = b;
                    self.retry.set_connected(b, now, &mut self.backend);
                }
                BackendMessage::Spectrum(text) => self.ingest_spectrum(&text),
                BackendMessage::Reading(param, value) => { self.readings.insert(param, value); }
                BackendMessage::SubsystemState(s, bits) => { self.subsystem_bits.insert(s, bits); }
            }
            if msg_count > 50 { break; }
        }

        // 2. 重试定时器
        self.retry.tick(now, &mut self.backend);
        let wait = self
            .retry
            .until_next(now)
            .unwrap_or(Duration::from_millis(100))
            .min(Duration::from_millis(100));
        ctx.request_repaint_after(wait);

        // 3. UI 绘制
        let mut visuals = egui::Visuals::dark();
        visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(10, 10, 15);
        ctx.set_visuals(visuals);

        egui::SidePanel::left("L").min_width(280.0).show(ctx, |ui| {
            ui.add_space(10.0);
            ui.heading("SEOP Panel");
            ui.label(self.endpoint.as_str());
            ui.separator();

            let btn_txt = if self.is_connected { "DISCONNECT" } else { "CONNECT" };
            if ui.button(btn_txt).clicked() {
                let cmd = if self.is_connected { GuiCommand::Disconnect } else { GuiCommand::Connect };
                self.backend.send(cmd);
            }
            if self.is_connected && ui.button("🔄 REQUEST SPECTRUM").clicked() {
                self.backend.request_spectrum();
            }

            ui.add_space(10.0);
            let mut write = None;
            egui::ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
                for group in ParameterGroup::ALL {
                    ui.label(egui::RichText::new(group.title()).strong());
                    for param in group.parameters() {
                        let current = self.readings.get(&param).copied();
                        let value = current
                            .map(|v| param.format_value(v))
                            .unwrap_or_else(|| "--".to_owned());
                        ui.horizontal(|ui| {
                            ui.label(param.label());
                            ui.monospace(value);
                            // 设定值 +/- 微调
                            if let Some(v) = current.filter(|_| param.is_setpoint() && self.is_connected) {
                                let step = param.setpoint_step();
                                if ui.small_button("-").clicked() { write = Some((param, v - step)); }
                                if ui.small_button("+").clicked() { write = Some((param, v + step)); }
                            }
                        });
                    }
                }
            });
            if let Some((param, value)) = write {
                self.backend.set_setpoint(param, value);
            }

            ui.add_space(10.0);
            ui.separator();
            egui::ScrollArea::vertical().id_source("log").max_height(120.0).show(ui, |ui| {
                for m in &self.log_messages { ui.monospace(m); }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut next = self.panel;
            ui.horizontal(|ui| {
                ui.selectable_value(&mut next, Panel::Spectrum, Panel::Spectrum.label());
                for s in PollingSubsystem::ALL {
                    ui.selectable_value(&mut next, Panel::Subsystem(s), s.label());
                }
            });
            self.switch_panel(next);
            ui.separator();

            match self.panel {
                Panel::Spectrum => {
                    let mut snapshot = false;
                    let mut reset = false;
                    ui.horizontal(|ui| {
                        if !self.is_connected { ui.label("Connect first."); }
                        snapshot = ui.add_enabled(self.chart.has_data(), egui::Button::new("💾 SAVE PNG")).clicked();
                        reset = ui.button("RESET VIEW").clicked();
                    });
                    if snapshot { self.save_snapshot(); }
                    if reset {
                        self.chart.reset();
                        self.last_report = None;
                    }
                    self.draw_spectrum(ui);
                }
                Panel::Subsystem(s) => self.draw_subsystem(ui, s),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingBackend;

    fn switched(from: Panel, to: Panel) -> Vec<GuiCommand> {
        let mut backend = RecordingBackend::default();
        switch_polling(&mut backend, from, to);
        backend.calls
    }

    #[test]
    fn spectrum_to_subsystem_only_enables() {
        assert_eq!(
            switched(Panel::Spectrum, Panel::Subsystem(PollingSubsystem::Valves)),
            vec![
                GuiCommand::PausePolling,
                GuiCommand::SetPolling(PollingSubsystem::Valves, true),
                GuiCommand::ResumePolling,
            ]
        );
    }

    #[test]
    fn subsystem_to_spectrum_only_disables() {
        assert_eq!(
            switched(Panel::Subsystem(PollingSubsystem::Fans), Panel::Spectrum),
            vec![
                GuiCommand::PausePolling,
                GuiCommand::SetPolling(PollingSubsystem::Fans, false),
                GuiCommand::ResumePolling,
            ]
        );
    }

    #[test]
    fn subsystem_to_subsystem_hands_over_in_order() {
        assert_eq!(
            switched(
                Panel::Subsystem(PollingSubsystem::Relays),
                Panel::Subsystem(PollingSubsystem::Fans),
            ),
            vec![
                GuiCommand::PausePolling,
                GuiCommand::SetPolling(PollingSubsystem::Relays, false),
                GuiCommand::SetPolling(PollingSubsystem::Fans, true),
                GuiCommand::ResumePolling,
            ]
        );
    }

    #[test]
    fn staying_on_a_panel_sends_nothing() {
        assert!(switched(Panel::Spectrum, Panel::Spectrum).is_empty());
        let valves = Panel::Subsystem(PollingSubsystem::Valves);
        assert!(switched(valves, valves).is_empty());
    }
}
