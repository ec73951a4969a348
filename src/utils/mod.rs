pub mod clipboard;
pub mod layout;
pub mod list_navigation;
pub mod path;
pub mod text_input;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use layout::{center_popup, create_standard_layout, phone_column};
pub use list_navigation::ListStateExt;
pub use path::{get_config_dir, get_config_path, get_home_dir, get_log_dir, get_log_path, LOG_FILE_NAME};
pub use text_input::TextInput;
