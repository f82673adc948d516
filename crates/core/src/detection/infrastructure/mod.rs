pub mod observation_file_detector;
