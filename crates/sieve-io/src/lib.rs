pub mod output;
pub mod userlist;

pub use output::{append, unique_path, write_new};
pub use userlist::{load_omissions, load_substitutions, load_word_list};
