use strum_macros::Display;

/// Internal simulation faults. None of these propagate out of the session;
/// each operation substitutes its conservative fallback and reports the
/// fault through the sink.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display)]
pub enum SimFault {
    #[strum(serialize = "non-finite telemetry reading")]
    NonFiniteTelemetry,
    #[strum(serialize = "non-finite altitude prediction")]
    NonFinitePrediction,
    #[strum(serialize = "corrupt telemetry frame")]
    CorruptTelemetry,
}

/// Result of a fallible simulation step that must always yield a value.
///
/// `Fallback` carries the substituted safe value together with the fault it
/// recovered from.
#[derive(Debug, PartialEq, Clone)]
pub enum Recovered<T> {
    Nominal(T),
    Fallback(T, SimFault),
}

impl<T> Recovered<T> {
    pub fn into_inner(self) -> T {
        match self {
            Recovered::Nominal(value) | Recovered::Fallback(value, _) => value,
        }
    }

    pub fn fault(&self) -> Option<SimFault> {
        match self {
            Recovered::Nominal(_) => None,
            Recovered::Fallback(_, fault) => Some(*fault),
        }
    }

    pub fn is_fallback(&self) -> bool { self.fault().is_some() }
}
