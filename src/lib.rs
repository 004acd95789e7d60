// ============================================
// Stardrift - Свободный полёт среди звёзд
// ============================================

pub mod space;
