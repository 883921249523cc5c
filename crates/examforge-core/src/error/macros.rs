//! Error macros for examforge

/// Macro for returning invalid input errors
#[macro_export]
macro_rules! bail_invalid {
    ($($arg:tt)*) => {
        return Err($crate::error::ExamError::invalid_input(format!($($arg)*)))
    };
}

/// Macro for mapping database errors
#[macro_export]
macro_rules! map_db_err {
    ($op:expr, $error:expr) => {
        $crate::error::ExamError::db_operation($op, $error)
    };
}
