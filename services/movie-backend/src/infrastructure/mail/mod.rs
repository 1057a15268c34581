//! 邮件投递

mod email_reset_password_mailer;

pub use email_reset_password_mailer::EmailResetPasswordMailer;
