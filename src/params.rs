// src/params.rs
// 参数元数据：固定的类型化表，替代按字符串查找的分组/字段字典

#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum ParameterGroup {
    WaterChiller,
    SeopCell,
    MagnetPsu,
    LaserPsu,
    Gases,
    Vacuum,
}

impl ParameterGroup {
    pub const ALL: [ParameterGroup; 6] = [
        ParameterGroup::WaterChiller,
        ParameterGroup::SeopCell,
        ParameterGroup::MagnetPsu,
        ParameterGroup::LaserPsu,
        ParameterGroup::Gases,
        ParameterGroup::Vacuum,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ParameterGroup::WaterChiller => "Water Chiller",
            ParameterGroup::SeopCell => "SEOP Cell",
            ParameterGroup::MagnetPsu => "Magnet PSU",
            ParameterGroup::LaserPsu => "Laser PSU",
            ParameterGroup::Gases => "Gases",
            ParameterGroup::Vacuum => "Vacuum",
        }
    }

    pub fn parameters(self) -> impl Iterator<Item = Parameter> {
        Parameter::ALL.into_iter().filter(move |p| p.group() == self)
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum Parameter {
    WaterChillerTemperature,
    WaterChillerSetpoint,
    SeopCellTemperature,
    SeopCellSetpoint,
    MagnetPsuCurrent,
    MagnetPsuSetpoint,
    LaserPsuCurrent,
    LaserPsuSetpoint,
    XenonPressure,
    XenonSetpoint,
    N2Pressure,
    N2Setpoint,
    VacuumPressure,
}

impl Parameter {
    pub const ALL: [Parameter; 13] = [
        Parameter::WaterChillerTemperature,
        Parameter::WaterChillerSetpoint,
        Parameter::SeopCellTemperature,
        Parameter::SeopCellSetpoint,
        Parameter::MagnetPsuCurrent,
        Parameter::MagnetPsuSetpoint,
        Parameter::LaserPsuCurrent,
        Parameter::LaserPsuSetpoint,
        Parameter::XenonPressure,
        Parameter::XenonSetpoint,
        Parameter::N2Pressure,
        Parameter::N2Setpoint,
        Parameter::VacuumPressure,
    ];

    pub fn group(self) -> ParameterGroup {
        use Parameter::*;
        match self {
            WaterChillerTemperature | WaterChillerSetpoint => ParameterGroup::WaterChiller,
            SeopCellTemperature | SeopCellSetpoint => ParameterGroup::SeopCell,
            MagnetPsuCurrent | MagnetPsuSetpoint => ParameterGroup::MagnetPsu,
            LaserPsuCurrent | LaserPsuSetpoint => ParameterGroup::LaserPsu,
            XenonPressure | XenonSetpoint | N2Pressure | N2Setpoint => ParameterGroup::Gases,
            VacuumPressure => ParameterGroup::Vacuum,
        }
    }

    pub fn label(self) -> &'static str {
        use Parameter::*;
        match self {
            WaterChillerTemperature => "Chiller temperature",
            WaterChillerSetpoint => "Chiller setpoint",
            SeopCellTemperature => "Cell temperature",
            SeopCellSetpoint => "Cell setpoint",
            MagnetPsuCurrent => "Magnet current",
            MagnetPsuSetpoint => "Magnet setpoint",
            LaserPsuCurrent => "Laser current",
            LaserPsuSetpoint => "Laser setpoint",
            XenonPressure => "Xe pressure",
            XenonSetpoint => "Xe setpoint",
            N2Pressure => "N2 pressure",
            N2Setpoint => "N2 setpoint",
            VacuumPressure => "Vacuum pressure",
        }
    }

    pub fn unit(self) -> &'static str {
        match self.group() {
            ParameterGroup::WaterChiller | ParameterGroup::SeopCell => "°C",
            ParameterGroup::MagnetPsu | ParameterGroup::LaserPsu => "A",
            ParameterGroup::Gases | ParameterGroup::Vacuum => "Torr",
        }
    }

    /// Decimal places shown in the readout.
    pub fn precision(self) -> usize {
        match self {
            Parameter::VacuumPressure => 4,
            Parameter::MagnetPsuCurrent | Parameter::MagnetPsuSetpoint => 3,
            _ => 1,
        }
    }

    pub fn is_setpoint(self) -> bool {
        use Parameter::*;
        matches!(
            self,
            WaterChillerSetpoint
                | SeopCellSetpoint
                | MagnetPsuSetpoint
                | LaserPsuSetpoint
                | XenonSetpoint
                | N2Setpoint
        )
    }

    /// Setpoint that drives this measured value.
    pub fn setpoint(self) -> Option<Parameter> {
        use Parameter::*;
        match self {
            WaterChillerTemperature => Some(WaterChillerSetpoint),
            SeopCellTemperature => Some(SeopCellSetpoint),
            MagnetPsuCurrent => Some(MagnetPsuSetpoint),
            LaserPsuCurrent => Some(LaserPsuSetpoint),
            XenonPressure => Some(XenonSetpoint),
            N2Pressure => Some(N2Setpoint),
            _ => None,
        }
    }

    /// Increment used by the +/- buttons.
    pub fn setpoint_step(self) -> f64 {
        use Parameter::*;
        match self {
            WaterChillerSetpoint | SeopCellSetpoint | XenonSetpoint | N2Setpoint => 1.0,
            MagnetPsuSetpoint => 0.01,
            LaserPsuSetpoint => 0.1,
            _ => 0.0,
        }
    }

    /// Typical operating value, used by the simulated instrument.
    pub fn nominal(self) -> f64 {
        use Parameter::*;
        match self {
            WaterChillerTemperature | WaterChillerSetpoint => 18.0,
            SeopCellTemperature | SeopCellSetpoint => 110.0,
            MagnetPsuCurrent | MagnetPsuSetpoint => 2.5,
            LaserPsuCurrent | LaserPsuSetpoint => 32.0,
            XenonPressure | XenonSetpoint => 75.0,
            N2Pressure | N2Setpoint => 900.0,
            VacuumPressure => 0.002,
        }
    }

    pub fn format_value(self, value: f64) -> String {
        format!("{:.*} {}", self.precision(), value, self.unit())
    }
}
