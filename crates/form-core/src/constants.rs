//! Constantes del motor de pasos.

/// Versión lógica del motor. Forma parte del `catalog_hash`, de modo que un
/// cambio incompatible en el particionado invalida los hashes previos.
pub const ENGINE_VERSION: &str = "S1.0";

/// Mensaje que se guarda en el mapa de errores para un campo obligatorio vacío.
pub const REQUIRED_MESSAGE: &str = "Campo obligatorio";
