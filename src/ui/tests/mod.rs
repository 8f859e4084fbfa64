mod display_data_tests;
