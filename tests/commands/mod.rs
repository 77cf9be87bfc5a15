mod test_chat;
mod test_export;
mod test_train;
