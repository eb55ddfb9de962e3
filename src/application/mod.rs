// Application layer: the roles screen and the collaborators it talks to
pub mod dialog;
pub mod notifications;
pub mod role_screen;
