pub mod lookup_command;
