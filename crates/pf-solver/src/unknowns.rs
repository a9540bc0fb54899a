//! Symbolic names for the unknowns and the elements of the AHU model.

use std::fmt;

/// Psychrometric points of the unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Point {
    /// 0: mixed fresh + recirculated air
    Mixed,
    /// 1: effective coil surface (apparatus dew point side)
    CoilSurface,
    /// 2: coil leaving air after by-pass mixing
    CoilLeaving,
    /// 3: supply air
    Supply,
    /// 4: indoor air
    Indoor,
}

impl Point {
    pub const COUNT: usize = 5;

    pub const ALL: [Point; Point::COUNT] = [
        Point::Mixed,
        Point::CoilSurface,
        Point::CoilLeaving,
        Point::Supply,
        Point::Indoor,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Point::Mixed => "mixed",
            Point::CoilSurface => "coil surface",
            Point::CoilLeaving => "coil leaving",
            Point::Supply => "supply",
            Point::Indoor => "indoor",
        }
    }
}

/// The 16 unknowns, in matrix column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Unknown {
    Theta0,
    W0,
    Theta1,
    W1,
    Theta2,
    W2,
    Theta3,
    W3,
    Theta4,
    W4,
    /// Total heat of the cooling coil [W]
    QtCoolingCoil,
    /// Sensible heat of the cooling coil [W]
    QsCoolingCoil,
    /// Latent heat of the cooling coil [W]
    QlCoolingCoil,
    /// Sensible heat of the reheat coil [W]
    QsHeatingCoil,
    /// Sensible heat of the thermal zone [W]
    QsZone,
    /// Latent heat of the thermal zone [W]
    QlZone,
}

impl Unknown {
    pub const COUNT: usize = 16;

    pub const ALL: [Unknown; Unknown::COUNT] = [
        Unknown::Theta0,
        Unknown::W0,
        Unknown::Theta1,
        Unknown::W1,
        Unknown::Theta2,
        Unknown::W2,
        Unknown::Theta3,
        Unknown::W3,
        Unknown::Theta4,
        Unknown::W4,
        Unknown::QtCoolingCoil,
        Unknown::QsCoolingCoil,
        Unknown::QlCoolingCoil,
        Unknown::QsHeatingCoil,
        Unknown::QsZone,
        Unknown::QlZone,
    ];

    /// Heat-flow unknowns, in column order.
    pub const HEAT_FLOWS: [Unknown; 6] = [
        Unknown::QtCoolingCoil,
        Unknown::QsCoolingCoil,
        Unknown::QlCoolingCoil,
        Unknown::QsHeatingCoil,
        Unknown::QsZone,
        Unknown::QlZone,
    ];

    pub fn column(self) -> usize {
        self as usize
    }

    /// Temperature unknown of a point.
    pub fn theta(point: Point) -> Unknown {
        Unknown::ALL[2 * point.index()]
    }

    /// Humidity-ratio unknown of a point.
    pub fn w(point: Point) -> Unknown {
        Unknown::ALL[2 * point.index() + 1]
    }

    pub fn is_heat_flow(self) -> bool {
        self.column() >= 2 * Point::COUNT
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Unknown::Theta0 => "θ0",
            Unknown::W0 => "w0",
            Unknown::Theta1 => "θ1",
            Unknown::W1 => "w1",
            Unknown::Theta2 => "θ2",
            Unknown::W2 => "w2",
            Unknown::Theta3 => "θ3",
            Unknown::W3 => "w3",
            Unknown::Theta4 => "θ4",
            Unknown::W4 => "w4",
            Unknown::QtCoolingCoil => "Qt_CC",
            Unknown::QsCoolingCoil => "Qs_CC",
            Unknown::QlCoolingCoil => "Ql_CC",
            Unknown::QsHeatingCoil => "Qs_HC",
            Unknown::QsZone => "Qs_TZ",
            Unknown::QlZone => "Ql_TZ",
        }
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Physical elements contributing equations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    MixingBox1,
    CoolingCoil,
    MixingBox2,
    HeatingCoil,
    ThermalZone,
    Building,
    TemperatureController,
    HumidityController,
}

impl Element {
    pub const ALL: [Element; 8] = [
        Element::MixingBox1,
        Element::CoolingCoil,
        Element::MixingBox2,
        Element::HeatingCoil,
        Element::ThermalZone,
        Element::Building,
        Element::TemperatureController,
        Element::HumidityController,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Element::MixingBox1 => "MX1",
            Element::CoolingCoil => "CC",
            Element::MixingBox2 => "MX2",
            Element::HeatingCoil => "HC",
            Element::ThermalZone => "TZ",
            Element::Building => "BL",
            Element::TemperatureController => "Kθ",
            Element::HumidityController => "Kw",
        }
    }

    /// Number of equations the element contributes.
    pub fn equation_count(self) -> usize {
        match self {
            Element::CoolingCoil => 4,
            Element::TemperatureController | Element::HumidityController => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
