use serde::{Deserialize, Serialize};

/// Puntero de navegación del asistente. Sólo avanza; `total` queda fijo al
/// cargar el catálogo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepState {
    current: usize,
    total: usize,
}

impl StepState {
    pub fn new(total: usize) -> Self {
        Self { current: 1, total: total.max(1) }
    }

    pub fn current(&self) -> usize { self.current }
    pub fn total(&self) -> usize { self.total }
    pub fn is_last(&self) -> bool { self.current == self.total }

    /// Avanza uno, sin pasar de `total`. Devuelve si hubo cambio.
    pub(crate) fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    pub(crate) fn reset(&mut self) {
        self.current = 1;
    }
}
